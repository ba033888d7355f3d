//! Command handlers. Each returns the text to print on success.

use tracing::info;

use crate::cli::Command;
use crate::error::AppError;
use crate::services::Services;

/// Runs one command against started services.
///
/// # Errors
/// Returns the failure to report; its message is user-facing.
pub async fn run(command: Command, services: &Services) -> Result<String, AppError> {
    match command {
        Command::SignIn { username, password } => {
            let password = password.ok_or(AppError::MissingPassword)?;
            let user = services.session.sign_in(&username, &password).await?;
            Ok(format!("Signed in as {} ({})", user.display_name(), user.initials()))
        }
        Command::SignOut => {
            services.session.sign_out().await;
            Ok("Signed out".to_string())
        }
        Command::Profile => {
            let profile = services.users.fetch_profile().await?;
            info!(user = profile.display_name(), "profile fetched");
            services.state.set_user(Some(profile.clone())).await;
            Ok(serde_json::to_string_pretty(&profile)?)
        }
        Command::Status => {
            let snapshot = services.state.snapshot();
            let user = snapshot
                .user
                .as_ref()
                .map_or("-", |user| user.display_name());
            Ok(format!(
                "environment:  {}\nbase url:     {}\nconnectivity: {}\ntoken held:   {}\nuser:         {}",
                services.config.environment,
                services.config.base_url,
                services.monitor.current_state(),
                services.session.has_valid_token().await,
                user,
            ))
        }
    }
}
