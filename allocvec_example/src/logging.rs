//! Routes the `log` records emitted by `allocvec` to a `tracing` subscriber.

use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a formatting subscriber that writes through the test harness, so reallocation traces
/// show up next to the test that caused them. Safe to call from every test.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Run with
/// `RUST_LOG=allocvec=trace` to see every relocation.
pub fn init_logging() {
    LOGGING_INITIALIZED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_filter(filter);

        tracing_subscriber::registry().with(layer).try_init().ok();
    });
}
