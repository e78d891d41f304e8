pub mod builders;
pub mod fixtures;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Default filter when `RUST_LOG` is unset: the simulator's own events at
/// `info`, everything else at `warn`.
pub const DEFAULT_TEST_FILTER: &str = "warn,jobshop_lab=info";

/// Install a per-test tracing subscriber once per test binary.
///
/// Output is captured by the test harness and only shown for failing tests.
/// To see per-step dispatch and time-advance events:
/// `RUST_LOG=jobshop_lab=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Fail the test if `f` does not finish within 5 seconds. Guards the async
/// rollout tests against a stuck `spawn_blocking` worker.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("rollout test timed out after 5 seconds")
}
