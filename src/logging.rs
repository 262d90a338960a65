use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with the given level directive and format.
///
/// `level` takes precedence, then `RUST_LOG`, then `warn` so that command
/// output stays readable by default. Logs go to stderr; stdout carries
/// command results.
pub fn init(level: Option<&str>, json_format: bool) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("Invalid log level '{}': {}. Falling back to 'warn'", level, e);
            EnvFilter::new("warn")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}
