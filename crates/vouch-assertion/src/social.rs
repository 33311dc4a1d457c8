//! Social assertions: a `(service, user)` pair outside the local user directory

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An identity on some service, such as `alice` on `twitter`.
///
/// The canonical string `service:user` is the identity's key for
/// de-duplication and ordering. `Display` renders the assertion form
/// `user@service`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialAssertion {
    /// Service key
    pub service: String,
    /// Normalized username on that service
    pub user: String,
}

impl SocialAssertion {
    /// Create a social assertion.
    pub fn new(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    /// Canonical `service:user` key.
    pub fn canonical(&self) -> String {
        format!("{}:{}", self.service, self.user)
    }
}

impl fmt::Display for SocialAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.service)
    }
}

impl Ord for SocialAssertion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical()
            .cmp(&other.canonical())
            .then_with(|| (&self.service, &self.user).cmp(&(&other.service, &other.user)))
    }
}

impl PartialOrd for SocialAssertion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_and_display() {
        let sa = SocialAssertion::new("twitter", "alice");
        assert_eq!(sa.canonical(), "twitter:alice");
        assert_eq!(sa.to_string(), "alice@twitter");
    }

    #[test]
    fn test_ordering_follows_canonical_string() {
        let mut v = vec![
            SocialAssertion::new("twitter", "alice"),
            SocialAssertion::new("github", "zed"),
            SocialAssertion::new("github", "bob"),
        ];
        v.sort();
        let canon: Vec<String> = v.iter().map(SocialAssertion::canonical).collect();
        assert_eq!(canon, ["github:bob", "github:zed", "twitter:alice"]);
    }

    #[test]
    fn test_ordering_agrees_with_equality() {
        let left = SocialAssertion::new("a:b", "c");
        let right = SocialAssertion::new("a", "b:c");
        assert_eq!(left.canonical(), right.canonical());
        assert_ne!(left, right);
        assert_ne!(left.cmp(&right), Ordering::Equal);

        let set: std::collections::BTreeSet<_> = [left, right].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
