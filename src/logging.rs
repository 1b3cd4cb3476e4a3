//! Opt-in JSON log output for drivers that embed the pipeline.
//!
//! The library only emits `tracing` events: `warn!` when a signal is too short to frame or
//! when silent/flat energy profiles fall back, `debug!` with frame geometry and voiced-frame
//! counts. Nothing is printed until a subscriber is installed, here or by the driver.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding filter directives, e.g. `energy_vad=debug`.
pub const LOG_ENV_VAR: &str = "ENERGY_VAD_LOG";

/// Errors from everything, plus this crate's degenerate-input warnings.
const DEFAULT_DIRECTIVES: &str = "error,energy_vad=warn";

/// Install the JSON subscriber, filtered by [`LOG_ENV_VAR`] when it is set.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    let directives = std::env::var(LOG_ENV_VAR).ok();

    let _ = tracing_subscriber::registry()
        .with(filter(directives.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true),
        )
        .try_init();
}

/// Build the filter from explicit directives, or the crate defaults when `None`.
///
/// Malformed directives are skipped rather than failing initialization.
fn filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::ERROR.into())
        .parse_lossy(directives.unwrap_or(DEFAULT_DIRECTIVES))
}
