//! Expression matching, rendering, and analysis through the public API

#![allow(clippy::expect_used)]

use vouch_assertion::{
    find_best_atom, find_best_string, is_team, partition_remote_local, Expression,
};
use vouch_testkit::{
    all_of, any_of, atom, fingerprint_hex, proofs, team_id_hex, uid_hex,
};

#[test]
fn test_fingerprint_suffix_match() {
    let fp = atom("fingerprint:AB12");
    assert!(fp.matches(&proofs(&[("fingerprint", "ffab12")])));
    assert!(fp.matches(&proofs(&[("fingerprint", "AB12")])));
    assert!(!fp.matches(&proofs(&[("fingerprint", "cd34")])));
}

#[test]
fn test_full_fingerprint_matches_key_proof() {
    let full = fingerprint_hex(9);
    let short = &full[full.len() - 16..];
    let token = format!("fingerprint:{short}");
    let expr = any_of(&[token.as_str()]);
    assert!(expr.matches(&proofs(&[("fingerprint", full.as_str())])));
}

#[test]
fn test_render_and_of_or() {
    let expr = Expression::and([any_of(&["a1", "b1"]), all_of(&["c1"])]);
    assert_eq!(expr.to_string(), "(a1,b1)+c1");
    assert_eq!(any_of(&["a1", "b1"]).to_string(), "a1,b1");
}

#[test]
fn test_web_matches_any_host_proof() {
    let expr = any_of(&["web:example.com"]);
    for kind in ["dns", "http", "https"] {
        assert!(expr.matches(&proofs(&[(kind, "example.com")])), "{kind}");
    }
    let http = any_of(&["http:example.com"]);
    assert!(http.matches(&proofs(&[("https", "example.com")])));
    assert!(!http.matches(&proofs(&[("dns", "example.com")])));
}

#[test]
fn test_best_atom_precedence() {
    let uid = format!("uid:{}", uid_hex(3));
    let uid_atom = atom(&uid);

    for order in [
        ["twitter:bob", uid.as_str(), "keybase:alice"],
        ["keybase:alice", "twitter:bob", uid.as_str()],
        [uid.as_str(), "keybase:alice", "twitter:bob"],
    ] {
        assert_eq!(find_best_atom(&any_of(&order)), Some(&uid_atom));
    }

    assert_eq!(find_best_string(&any_of(&["keybase:alice", "twitter:bob"])), "alice");
    assert_eq!(
        find_best_string(&any_of(&["rooter:bob", "twitter:carol"])),
        "carol@twitter"
    );
}

#[test]
fn test_best_atom_of_team_expression() {
    let tid = format!("tid:{}", team_id_hex(5, false));
    let expr = all_of(&["team:acme", tid.as_str()]);
    let best = find_best_atom(&expr);
    assert!(best.is_some_and(|a| a.is_team_id()));
    assert!(is_team(best));
    assert!(!is_team(find_best_atom(&all_of(&["alice"]))));
}

#[test]
fn test_partition_example() {
    let (remotes, locals) = partition_remote_local(&all_of(&["dns:example.com", "keybase:alice"]));
    assert_eq!(remotes.factors(), [Expression::from(atom("dns:example.com"))]);
    assert_eq!(locals.factors(), [Expression::from(atom("keybase:alice"))]);
}

#[test]
fn test_nested_matching() {
    let expr = Expression::and([
        any_of(&["alice@twitter", "alice@github"]),
        any_of(&["dns:alice.dev", "https:alice.dev"]),
    ]);
    assert!(expr.matches(&proofs(&[("twitter", "alice"), ("https", "alice.dev")])));
    assert!(!expr.matches(&proofs(&[("twitter", "alice"), ("github", "alice")])));
}
