//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TSDETECT_LOG";

/// Initialize the tsdetect tracing/logging system.
///
/// Reads `TSDETECT_LOG` for per-module log levels, e.g.
/// `TSDETECT_LOG=tsdetect_analysis=debug,tsdetect_cli=info`.
///
/// Falls back to `info` for the tsdetect crates if the variable is unset
/// or invalid. Logs go to stderr so report output on stdout stays clean.
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            EnvFilter::new("tsdetect_core=info,tsdetect_analysis=info,tsdetect_cli=info")
        });

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
