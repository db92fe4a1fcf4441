use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "RELEASE_GUARDIAN_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RELEASE_GUARDIAN_LOG` takes precedence over `default_filter`. Output
/// always goes to stderr: stdout carries protocol frames and reports.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
