//! Property test strategies for assertion types
//!
//! Generated values are always valid under the default social service
//! table, so strategies compose without filtering.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use crate::fixtures::UID_SUFFIX;
use vouch_assertion::Proof;
use vouch_core::{TeamId, TeamName, Uid};

/// Services in the default table whose rules accept [`arb_username`] output.
pub const SOCIAL_SERVICES: &[&str] = &["twitter", "github", "hackernews", "rooter"];

/// Strategy for local usernames: 2..=15 chars, letter first, no underscores.
pub fn arb_username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{1,14}"
}

/// Strategy for a social service key.
pub fn arb_social_service() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SOCIAL_SERVICES)
}

/// Strategy for hostnames with two or three labels.
pub fn arb_hostname() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(\\.[a-z][a-z0-9]{0,8})?\\.[a-z]{2,6}"
}

/// Strategy for user IDs.
pub fn arb_uid() -> impl Strategy<Value = Uid> {
    any::<[u8; 15]>().prop_map(|prefix| {
        let mut hex: String = prefix.iter().map(|b| format!("{b:02x}")).collect();
        hex.push_str(&format!("{UID_SUFFIX:02x}"));
        Uid::from_hex(&hex).expect("generated uid is valid")
    })
}

/// Strategy for team IDs covering all four team suffixes.
pub fn arb_team_id() -> impl Strategy<Value = TeamId> {
    (any::<[u8; 15]>(), 0x24u8..=0x27).prop_map(|(prefix, suffix)| {
        let mut hex: String = prefix.iter().map(|b| format!("{b:02x}")).collect();
        hex.push_str(&format!("{suffix:02x}"));
        TeamId::from_hex(&hex).expect("generated team id is valid")
    })
}

/// Strategy for team names of one to three parts.
pub fn arb_team_name() -> impl Strategy<Value = TeamName> {
    proptest::collection::vec(arb_username(), 1..=3).prop_map(|parts| {
        TeamName::parse(&parts.join(".")).expect("generated team name is valid")
    })
}

/// Strategy for full or partial PGP fingerprints (even-length hex).
pub fn arb_fingerprint() -> impl Strategy<Value = String> {
    "([0-9a-f]{2}){2,20}"
}

/// Strategy for assertion tokens of every locally checkable kind.
pub fn arb_atom_token() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_username(),
        arb_username().prop_map(|u| format!("keybase:{u}")),
        (arb_username(), arb_social_service()).prop_map(|(u, s)| format!("{u}@{s}")),
        arb_hostname().prop_map(|h| format!("dns:{h}")),
        arb_hostname().prop_map(|h| format!("https://{h}")),
        arb_uid().prop_map(|uid| format!("uid:{uid}")),
        arb_team_id().prop_map(|tid| format!("tid:{tid}")),
        arb_team_name().prop_map(|name| format!("team:{name}")),
        arb_fingerprint().prop_map(|fp| format!("fingerprint:{fp}")),
    ]
}

/// Strategy for a proof on a social service or domain.
pub fn arb_proof() -> impl Strategy<Value = Proof> {
    prop_oneof![
        (arb_social_service(), arb_username()).prop_map(|(s, u)| Proof::new(s, u)),
        arb_hostname().prop_map(|h| Proof::new("dns", h)),
        arb_hostname().prop_map(|h| Proof::new("https", h)),
    ]
}
