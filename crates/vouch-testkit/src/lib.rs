//! Vouch Testing Infrastructure
//!
//! Shared fixtures and proptest strategies for the Vouch crates. Depend on it
//! from integration tests and benches only:
//!
//! ```toml
//! [dev-dependencies]
//! vouch-testkit = { path = "../vouch-testkit" }
//! ```
//!
//! ```rust,no_run
//! use vouch_testkit::*;
//!
//! let expr = any_of(&["alice@twitter", "alice@github"]);
//! assert!(expr.matches(&proofs(&[("github", "alice")])));
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::*;

/// Install a test-friendly `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test; only the
/// first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
