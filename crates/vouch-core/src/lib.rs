//! Vouch Core - identity primitives for the assertion engine
//!
//! This crate holds the collaborators the assertion parser depends on but
//! does not own:
//!
//! - `identifiers`: UID, team ID, and team name codecs
//! - `validation`: username, hostname, and hex syntax checks
//! - `context`: the `AssertionContext` social-name normalization hook and its
//!   table-driven implementation
//! - `config`: loading and validating the social service table
//! - `errors`: the `AssertionError` taxonomy shared by every Vouch crate
//!
//! Everything here is synchronous and free of I/O apart from
//! `AssertionConfig::load_from_file`.

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod errors;
pub mod identifiers;
pub mod validation;

pub use config::{AssertionConfig, SocialServiceConfig, RESERVED_ASSERTION_KEYS};
pub use context::{AssertionContext, SocialServiceRegistry};
pub use errors::{AssertionError, Result};
pub use identifiers::{
    IdentifierError, TeamId, TeamName, Uid, PGP_ASSERTION_KEY, PGP_FINGERPRINT_HEX_LEN,
};
pub use validation::{check_username, is_valid_hex, is_valid_hostname, Checker, CHECK_USERNAME};
