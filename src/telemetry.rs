use color_eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber is
/// already installed.
#[cfg(feature = "bunyan")]
pub fn setup_logger() -> Result<()> {
    use std::{fs::create_dir_all, path::PathBuf};
    use tracing_appender::rolling;
    use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};

    let log_dir_path = PathBuf::from(".logs");
    create_dir_all(&log_dir_path)?;

    let logfile = if cfg!(debug_assertions) {
        rolling::daily(log_dir_path, "tiktok-info-bot.log")
    } else {
        rolling::never(log_dir_path, "tiktok-info-bot.log")
    };

    let formatter = BunyanFormattingLayer::new("tiktok-info-bot".into(), logfile);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(JsonStorageLayer)
        .with(formatter)
        .try_init()?;

    Ok(())
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
#[cfg(not(feature = "bunyan"))]
pub fn setup_logger() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()?;

    Ok(())
}
