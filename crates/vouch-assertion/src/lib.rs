//! Vouch Assertion - identity assertion expressions
//!
//! An assertion names an identity by one or more claims that must be backed
//! by proofs: `alice`, `alice@twitter`, `dns:example.com`,
//! `(alice@twitter,alice@github)+uid:...`. This crate provides:
//!
//! - `atom`: a single normalized `key:value` claim and how it matches proofs
//! - `parser`: token splitting and per-kind normalization into atoms
//! - `expression`: AND/OR trees over atoms, matching and canonical rendering
//! - `analysis`: best-representative selection and the remote/local partition
//! - `proof`: the multimap of proofs an identity holds
//! - `implicit_team`: display names of member-defined teams
//! - `paths`: `/keybase/...` folder paths that name teams
//!
//! # Architecture
//!
//! Identifier codecs, syntax checks, and the social-name normalization hook
//! live in `vouch-core`. Parsing takes the hook as `&dyn AssertionContext`, so
//! callers choose which social services exist.
//!
//! # Example
//!
//! ```ignore
//! use vouch_assertion::{parse_atom, Expression, Proof, ProofSet};
//! use vouch_core::SocialServiceRegistry;
//!
//! let ctx = SocialServiceRegistry::default();
//! let expr = Expression::or([
//!     parse_atom(&ctx, "alice@twitter", true)?,
//!     parse_atom(&ctx, "alice@github", true)?,
//! ]);
//!
//! let proofs: ProofSet = [Proof::new("github", "alice")].into_iter().collect();
//! assert!(expr.matches(&proofs));
//! ```

#![forbid(unsafe_code)]

pub mod analysis;
pub mod atom;
pub mod expression;
pub mod implicit_team;
pub mod parser;
pub mod paths;
pub mod proof;
pub mod social;

// Re-export primary types
pub use analysis::{find_best_atom, find_best_string, is_team, partition_remote_local};
pub use atom::{Atom, AtomKind};
pub use expression::{AndExpression, Expression, OrExpression};
pub use implicit_team::{
    format_conflict_suffix, parse_implicit_team_display_name, ImplicitTeamConflictInfo,
    ImplicitTeamDisplayName, ImplicitTeamUserSet,
};
pub use parser::{parse_atom, parse_atom_key_value, parse_key_value};
pub use paths::{parse_team_kbfs_path, parse_tlf_path};
pub use proof::{Proof, ProofSet};
pub use social::SocialAssertion;
