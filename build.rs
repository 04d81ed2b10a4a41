//! Build script for spotdash.
//!
//! Copies the `.env.example` configuration template into the directory the
//! application reads its `.env` from, so a fresh install comes with a
//! ready-to-edit template:
//!
//! - Linux: `~/.local/share/spotdash/.env.example`
//! - macOS: `~/Library/Application Support/spotdash/.env.example`
//! - Windows: `%LOCALAPPDATA%/spotdash/.env.example`
//!
//! The copy is a convenience only. A missing template or an unwritable data
//! directory produces a cargo warning, never a failed build.

use std::{env, fs, io, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let template = PathBuf::from(manifest_dir).join(".env.example");
    if !template.is_file() {
        println!("cargo:warning=.env.example not found at {}", template.display());
        return;
    }

    if let Err(e) = copy_template(&template) {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_template(template: &PathBuf) -> io::Result<()> {
    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotdash");
    fs::create_dir_all(&out_dir)?;
    fs::copy(template, out_dir.join(".env.example"))?;
    Ok(())
}
