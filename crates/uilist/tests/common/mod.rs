// Shared test helpers

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes tracing once per test binary. Honors RUST_LOG.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
