//! Assertion test fixtures
//!
//! Deterministic identifiers and one-line builders for atoms, expressions,
//! and proof sets. Builders panic on bad input; they are for tests.

use vouch_assertion::{parse_atom, Atom, Expression, Proof, ProofSet};
use vouch_core::{SocialServiceRegistry, PGP_FINGERPRINT_HEX_LEN};

/// Suffix byte of a user ID.
pub const UID_SUFFIX: u8 = 0x00;

/// Suffix byte of a private root team ID.
pub const PRIVATE_TEAM_SUFFIX: u8 = 0x24;

/// Suffix byte of a public root team ID.
pub const PUBLIC_TEAM_SUFFIX: u8 = 0x25;

/// Social context with the built-in service table.
pub fn test_context() -> SocialServiceRegistry {
    SocialServiceRegistry::default()
}

fn id_hex(seed: u8, suffix: u8) -> String {
    let mut bytes = [seed; 16];
    bytes[15] = suffix;
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Lowercase hex of a valid user ID derived from `seed`.
pub fn uid_hex(seed: u8) -> String {
    id_hex(seed, UID_SUFFIX)
}

/// Lowercase hex of a valid root team ID derived from `seed`.
pub fn team_id_hex(seed: u8, public: bool) -> String {
    let suffix = if public {
        PUBLIC_TEAM_SUFFIX
    } else {
        PRIVATE_TEAM_SUFFIX
    };
    id_hex(seed, suffix)
}

/// Full-length lowercase PGP fingerprint derived from `seed`.
pub fn fingerprint_hex(seed: u8) -> String {
    (0..PGP_FINGERPRINT_HEX_LEN / 2)
        .map(|i| format!("{:02x}", seed.wrapping_add(i as u8)))
        .collect()
}

/// Parse `token` with the default context in non-strict mode.
pub fn atom(token: &str) -> Atom {
    parse_atom(&test_context(), token, false)
        .unwrap_or_else(|e| panic!("fixture atom {token:?}: {e}"))
}

/// OR of the atoms named by `tokens`.
pub fn any_of(tokens: &[&str]) -> Expression {
    Expression::or(tokens.iter().map(|t| atom(t)))
}

/// AND of the atoms named by `tokens`.
pub fn all_of(tokens: &[&str]) -> Expression {
    Expression::and(tokens.iter().map(|t| atom(t)))
}

/// A single proof.
pub fn proof(key: &str, value: &str) -> Proof {
    Proof::new(key, value)
}

/// A proof set from `(key, value)` pairs.
pub fn proofs(pairs: &[(&str, &str)]) -> ProofSet {
    pairs.iter().map(|(k, v)| proof(k, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_core::{TeamId, Uid};

    #[test]
    fn test_identifier_fixtures_decode() {
        assert!(Uid::from_hex(&uid_hex(7)).is_ok());
        let public = TeamId::from_hex(&team_id_hex(7, true)).unwrap();
        assert!(public.is_public());
        let private = TeamId::from_hex(&team_id_hex(7, false)).unwrap();
        assert!(!private.is_public());
        assert_eq!(fingerprint_hex(1).len(), PGP_FINGERPRINT_HEX_LEN);
    }
}
