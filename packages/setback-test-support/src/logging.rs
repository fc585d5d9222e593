//! Test logging bootstrap for the setback crates.
//!
//! Installed once per test binary, either by the `ctor` hook in
//! `setback-core`'s lib or by `tests/common/mod.rs`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet by default, but keep engine lifecycle lines (hand dealt, hand scored,
/// game ended) in the captured output of a failing test.
pub const DEFAULT_DIRECTIVES: &str = "warn,setback_core=info";

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Directives from `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVES`].
fn directives() -> String {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

/// Install the test subscriber. Repeated calls are no-ops.
///
/// ```bash
/// TEST_LOG=setback_core=debug cargo test -p setback-core -- --nocapture
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(directives())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        // Another subscriber may already be installed by the test harness.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
    });
}
