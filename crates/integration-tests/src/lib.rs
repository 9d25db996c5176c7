//! Integration tests for the Sucre Store client.
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart aggregation, derived totals, and durable persistence
//! - `session_flow` - Login/logout lifecycle and route-access decisions
//!
//! Tests run fully offline: the stores take injected storage backends, and
//! the one network-facing scenario (logout notification) points at an
//! unreachable address on purpose.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A per-test scratch directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create a uniquely named scratch directory for `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "sucre-it-{name}-{}",
            std::process::id()
        ));
        Self { path }
    }

    /// Path of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.path).ok();
    }
}
