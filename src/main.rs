//! Photobooth Admin
//!
//! Serves the admin console. With the `server` feature the configuration is
//! read from file and environment; the browser build uses the defaults.

use photobooth_admin::{app, config};

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "server")]
    let config = {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "photobooth_admin=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();

        tracing::info!(
            "Starting Photobooth Admin v{} ({})",
            env!("PBA_VERSION"),
            env!("PBA_GIT_SHA")
        );

        let config = config::load_config()?;
        tracing::info!("Configuration loaded, API: {}", config.api_base_url);
        config
    };

    #[cfg(not(feature = "server"))]
    let config = config::AdminConfig::default();

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(app::App);

    Ok(())
}
