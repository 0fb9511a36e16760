use anyhow::Context;
use std::io;
use tokio::io::BufReader;
use tracing::info;

use em_app::{screen, start_session, telemetry};
use em_shared::{AppConfig, Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables; the per-environment file wins over .env
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.logging)?;

    let email = std::env::args()
        .nth(1)
        .context("usage: verify-email <email>")?;

    info!(
        environment = %config.environment,
        backend = ?config.backend.provider,
        language = %config.verification.language,
        "Starting verification screen"
    );

    let (controller, routes) = start_session(&config, &email)?;
    let input = BufReader::new(tokio::io::stdin());
    let mut out = io::stdout();

    let reason = screen::run_screen(
        &controller,
        routes,
        input,
        &mut out,
        config.verification.language,
    )
    .await?;

    info!(reason = ?reason, "Verification screen closed");
    Ok(())
}
