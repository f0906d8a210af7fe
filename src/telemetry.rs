// 📡 Logging setup
//
// Logs go to stderr so they never interleave with command feedback on stdout.

use tracing::metadata::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Overrides everything else when set, e.g. `WEIGHT_BOOK_LOG=weight_book=trace`
pub const LOG_ENV_VAR: &str = "WEIGHT_BOOK_LOG";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(configured_level: LevelFilter, verbosity: u8) {
    let default_level = level_from_verbosity(verbosity).max(configured_level);

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = Registry::default().with(filter).with(layer).try_init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}
