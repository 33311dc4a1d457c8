//! Property tests for identifier codecs and syntax validators

#![allow(clippy::expect_used)]

use proptest::prelude::*;
use vouch_core::{check_username, is_valid_hostname, TeamId, TeamName, Uid};

fn arb_uid_hex() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(any::<u8>(), 15),
        prop_oneof![Just(0x00u8), Just(0x19u8)],
    )
        .prop_map(|(mut bytes, suffix)| {
            bytes.push(suffix);
            hex::encode(bytes)
        })
}

proptest! {
    /// Every well-formed UID decodes and re-encodes to its lowercase form.
    #[test]
    fn uid_hex_roundtrip(hex_uid in arb_uid_hex(), upper in any::<bool>()) {
        let input = if upper { hex_uid.to_uppercase() } else { hex_uid.clone() };
        let uid = Uid::from_hex(&input).expect("valid uid");
        prop_assert_eq!(uid.to_string(), hex_uid);
    }

    /// A UID never decodes as a team ID.
    #[test]
    fn uid_is_not_team_id(hex_uid in arb_uid_hex()) {
        prop_assert!(TeamId::from_hex(&hex_uid).is_err());
    }

    /// Team names canonicalize to lowercase and are idempotent.
    #[test]
    fn team_name_canonical_idempotent(parts in proptest::collection::vec("[a-zA-Z0-9]{2,16}", 1..4)) {
        let raw = parts.join(".");
        let name = TeamName::parse(&raw).expect("valid team name");
        prop_assert_eq!(name.to_string(), raw.to_lowercase());
        let again = TeamName::parse(&name.to_string()).expect("canonical form parses");
        prop_assert_eq!(again, name);
    }

    /// Usernames outside the length window are always rejected.
    #[test]
    fn username_length_window(name in "[a-z0-9]{17,24}") {
        prop_assert!(!check_username(&name));
        prop_assert!(check_username(&name[..16]));
    }

    /// Dotted alphanumeric names with a long enough TLD are valid hostnames.
    #[test]
    fn simple_hostnames_valid(labels in proptest::collection::vec("[a-z0-9]{1,10}", 1..4), tld in "[a-z]{2,6}") {
        let host = format!("{}.{}", labels.join("."), tld);
        prop_assert!(is_valid_hostname(&host));
    }
}
