use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Quiet by default: stdout carries the answers and stderr the rejected lines.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Installs a stderr subscriber filtered by `filter`, falling back to `RUST_LOG`.
pub fn init_logger(filter: Option<&str>) -> Result<()> {
    let directives = filter
        .map(str::to_owned)
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    let env_filter = EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("invalid log filter {directives:?}, falling back to '{DEFAULT_LEVEL}' - {err}");
        EnvFilter::new(DEFAULT_LEVEL.to_string())
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(env_filter)
        .try_init()?;

    Ok(())
}
