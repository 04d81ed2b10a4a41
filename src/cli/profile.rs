use crate::{cli::Dashboard, info, utils, warning};

pub async fn profile() {
    let dashboard = Dashboard::connect().await;
    let pb = utils::spinner("Fetching profile...");
    let result = dashboard
        .guard(dashboard.client().get_current_user_profile().await)
        .await;
    pb.finish_and_clear();

    match result {
        Ok(user) => {
            info!(
                "{} ({})",
                user.display_name.as_deref().unwrap_or(&user.id),
                user.id
            );
            if let Some(email) = &user.email {
                info!("Email: {}", email);
            }
            if let Some(country) = &user.country {
                info!("Country: {}", country);
            }
            if let Some(product) = &user.product {
                info!("Subscription: {}", product);
            }
            info!("Followers: {}", user.followers.total);
        }
        Err(e) => warning!("Failed to load profile. Err: {}", e),
    }
}
