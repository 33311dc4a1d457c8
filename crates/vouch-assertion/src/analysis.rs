//! Post-parse analysis of expression trees

use crate::atom::Atom;
use crate::expression::{AndExpression, Expression};
use tracing::trace;

/// Social service ranked below every other social service.
pub const DEPRIORITIZED_SERVICE: &str = "rooter";

/// Pick the single atom that best represents `expr`.
///
/// A user ID or team ID wins outright: the first one seen ends the scan.
/// Otherwise the first atom of each remaining category is kept and the
/// winner is, in order, keybase, team name, fingerprint, social on any
/// service but rooter, rooter social, and finally the first atom in the tree.
pub fn find_best_atom(expr: &Expression) -> Option<&Atom> {
    let atoms = expr.collect_atoms();
    let first = *atoms.first()?;

    let mut keybase = None;
    let mut team_name = None;
    let mut fingerprint = None;
    let mut rooter = None;
    let mut social = None;

    for &atom in &atoms {
        if atom.is_uid() || atom.is_team_id() {
            trace!(atom = %atom, "Best atom is an unambiguous identifier");
            return Some(atom);
        }

        if atom.is_keybase() {
            keybase.get_or_insert(atom);
        } else if atom.is_team_name() {
            team_name.get_or_insert(atom);
        } else if atom.is_fingerprint() {
            fingerprint.get_or_insert(atom);
        } else if atom.is_social() {
            if atom.key() == DEPRIORITIZED_SERVICE {
                rooter.get_or_insert(atom);
            } else {
                social.get_or_insert(atom);
            }
        }
    }

    let best = keybase
        .or(team_name)
        .or(fingerprint)
        .or(social)
        .or(rooter)
        .unwrap_or(first);
    trace!(atom = %best, candidates = atoms.len(), "Selected best atom");
    Some(best)
}

/// Render the best atom of `expr`, or the empty string for an atom-free tree.
pub fn find_best_string(expr: &Expression) -> String {
    find_best_atom(expr)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Split the atoms of `expr` into remote (host) and local groups.
///
/// Returns `(remotes, locals)` as flat conjunctions in collection order.
pub fn partition_remote_local(expr: &Expression) -> (AndExpression, AndExpression) {
    let mut remotes = AndExpression::default();
    let mut locals = AndExpression::default();
    for atom in expr.collect_atoms() {
        if atom.is_remote() {
            remotes.push(atom.clone());
        } else {
            locals.push(atom.clone());
        }
    }
    (remotes, locals)
}

/// Whether `atom` names a team by ID or by name.
pub fn is_team(atom: Option<&Atom>) -> bool {
    atom.is_some_and(|a| a.is_team_id() || a.is_team_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_atom;
    use vouch_core::SocialServiceRegistry;

    const UID: &str = "uid:0123456789abcdef0123456789abcd00";
    const TID: &str = "tid:0123456789abcdef0123456789abcd24";

    fn atom(token: &str) -> Atom {
        parse_atom(&SocialServiceRegistry::default(), token, false).unwrap()
    }

    fn or_of(tokens: &[&str]) -> Expression {
        Expression::or(tokens.iter().map(|t| atom(t)))
    }

    fn best(tokens: &[&str]) -> String {
        find_best_string(&or_of(tokens))
    }

    #[test]
    fn test_uid_wins_regardless_of_position() {
        let expected = atom(UID).to_string();
        assert_eq!(best(&["bob@twitter", UID, "keybase:alice"]), expected);
        assert_eq!(best(&["keybase:alice", "bob@twitter", UID]), expected);
    }

    #[test]
    fn test_first_unambiguous_id_short_circuits() {
        // A team ID seen first beats a later UID.
        assert_eq!(best(&[TID, UID]), atom(TID).to_string());
        assert_eq!(best(&[UID, TID]), atom(UID).to_string());
    }

    #[test]
    fn test_keybase_beats_social() {
        assert_eq!(best(&["keybase:alice", "bob@twitter"]), "alice");
        assert_eq!(best(&["bob@twitter", "keybase:alice"]), "alice");
    }

    #[test]
    fn test_first_of_each_category_is_kept() {
        assert_eq!(best(&["keybase:alice", "keybase:bob"]), "alice");
        assert_eq!(best(&["team:acme", "team:zeta"]), "acme@team");
        assert_eq!(
            best(&["fingerprint:ab12", "fingerprint:cd34"]),
            "ab12@fingerprint"
        );
    }

    #[test]
    fn test_category_order() {
        assert_eq!(best(&["bob@twitter", "team:acme"]), "acme@team");
        assert_eq!(best(&["bob@twitter", "fingerprint:ab12"]), "ab12@fingerprint");
        assert_eq!(best(&["team:acme", "keybase:alice"]), "alice");
    }

    #[test]
    fn test_rooter_ranks_below_other_social() {
        assert_eq!(best(&["bob@rooter", "carol@twitter"]), "carol@twitter");
        assert_eq!(best(&["carol@twitter", "bob@rooter"]), "carol@twitter");
        assert_eq!(best(&["bob@rooter", "fingerprint:ab12"]), "ab12@fingerprint");
        assert_eq!(best(&["bob@rooter", "dns:example.com"]), "bob@rooter");
    }

    #[test]
    fn test_fallback_to_first_atom() {
        assert_eq!(
            best(&["dns:example.com", "https:example.org"]),
            "example.com@dns"
        );
    }

    #[test]
    fn test_empty_tree() {
        let empty = Expression::or(Vec::<Expression>::new());
        assert!(find_best_atom(&empty).is_none());
        assert_eq!(find_best_string(&empty), "");
    }

    #[test]
    fn test_partition_remote_local() {
        let expr = Expression::and([atom("dns:example.com"), atom("keybase:alice")]);
        let (remotes, locals) = partition_remote_local(&expr);
        assert_eq!(remotes.to_string(), "example.com@dns");
        assert_eq!(locals.to_string(), "alice");
    }

    #[test]
    fn test_partition_keeps_social_local() {
        let expr = Expression::or([
            atom("bob@twitter"),
            atom("web:example.com"),
            atom("fingerprint:ab12"),
            atom("http:example.org"),
        ]);
        let (remotes, locals) = partition_remote_local(&expr);
        assert_eq!(remotes.to_string(), "example.com@web+example.org@http");
        assert_eq!(locals.to_string(), "bob@twitter+ab12@fingerprint");
    }

    #[test]
    fn test_is_team() {
        assert!(is_team(Some(&atom(TID))));
        assert!(is_team(Some(&atom("team:acme"))));
        assert!(!is_team(Some(&atom(UID))));
        assert!(!is_team(None));
    }
}
