//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Once;

use xslack::{Api, CachedClient, Client, MockTransport};

static INIT: Once = Once::new();

/// Route `tracing` output to the test harness; honors RUST_LOG.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Handle over a plain client and the mock behind it.
pub fn plain_api() -> (Api, MockTransport) {
    init_logging();
    let mock = MockTransport::new();
    (Api::from(Client::new(mock.clone())), mock)
}

/// Handle over a caching client rooted at `dir`.
pub fn cached_api(dir: &std::path::Path) -> (Api, MockTransport) {
    init_logging();
    let mock = MockTransport::new();
    let cached = CachedClient::new(Client::new(mock.clone()), dir).expect("cache dir");
    (Api::from(cached), mock)
}
