//! Tracing setup for the vir binary

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing system.
///
/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// selects the filter (default `warn`); `verbose` forces `debug`.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
