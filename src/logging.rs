//! Tracing subscriber set-up

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "magicui_rs=debug,tower_http=debug,info"
    } else {
        "magicui_rs=info,warn"
    }
}

/// Install the global subscriber. Events go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {}", e))
}
