use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotdash::{
    cli, config, error,
    types::{PlaylistSortKey, PlaylistSource, TimeRange},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify
    Auth,

    /// Forget the saved session
    Logout,

    /// Show your account information
    Profile,

    /// Show your most played tracks
    TopTracks(TimeRangeOptions),

    /// Show your most played artists
    TopArtists(TimeRangeOptions),

    /// Show recently played tracks
    Recent,

    /// Analyze your recent listening
    History,

    /// Analyze an artist (defaults to your favorite artist)
    Artist(ArtistOptions),

    /// Get recommendations, optionally saved as a playlist
    Discover(DiscoverOptions),

    /// List genres usable for discovery
    Genres,

    /// List, search and sort your playlists
    Playlists(PlaylistsOptions),

    /// Create a playlist from your top tracks or top artists
    Generate(GenerateOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TimeRangeOptions {
    /// Time range to look at
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    /// Spotify artist id
    #[clap(long)]
    pub id: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Seed genre; can be repeated (at most 5 are used)
    #[clap(long = "genre", num_args = 1)]
    pub genres: Vec<String>,

    /// Save the recommendations as a private playlist with this name
    #[clap(long)]
    pub save: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,

    /// Sort key
    #[clap(long, value_enum, default_value_t = PlaylistSortKey::Name)]
    pub sort: PlaylistSortKey,

    /// Sort in descending order
    #[clap(long)]
    pub desc: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Name of the new playlist
    #[clap(long)]
    pub name: String,

    /// Where the tracks come from
    #[clap(long, value_enum, default_value_t = PlaylistSource::Tracks)]
    pub source: PlaylistSource,

    /// Time range to look at
    #[clap(long, value_enum, default_value_t = TimeRange::MediumTerm)]
    pub range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Logout => cli::logout().await,
        Command::Profile => cli::profile().await,
        Command::TopTracks(opt) => cli::top_tracks(opt.range).await,
        Command::TopArtists(opt) => cli::top_artists(opt.range).await,
        Command::Recent => cli::recent().await,
        Command::History => cli::history().await,
        Command::Artist(opt) => cli::artist(opt.id).await,
        Command::Discover(opt) => cli::discover(opt.genres, opt.save).await,
        Command::Genres => cli::genres().await,
        Command::Playlists(opt) => cli::playlists(opt.search, opt.sort, opt.desc).await,
        Command::Generate(opt) => cli::generate(opt.name, opt.source, opt.range).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
