//! Syntax validators for usernames, hostnames, and hex strings

use once_cell::sync::Lazy;
use regex::Regex;

/// A named syntax predicate with a human-readable hint for failures.
#[derive(Debug, Clone, Copy)]
pub struct Checker {
    /// The predicate
    pub predicate: fn(&str) -> bool,
    /// Hint shown when the predicate fails
    pub hint: &'static str,
}

impl Checker {
    /// Run the predicate.
    pub fn check(&self, s: &str) -> bool {
        (self.predicate)(s)
    }
}

/// Minimum length of a username.
pub const USERNAME_MIN_LEN: usize = 2;

/// Maximum length of a username.
pub const USERNAME_MAX_LEN: usize = 16;

// No leading underscore and no two underscores in a row.
#[allow(clippy::expect_used)] // literal pattern
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9_]?)+$").expect("username pattern"));

#[allow(clippy::expect_used)] // literal pattern
static HOST_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:[a-z0-9]|[a-z0-9][a-z0-9-]*[a-z0-9])$").expect("hostname label pattern")
});

fn username_ok(s: &str) -> bool {
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&s.len()) && USERNAME_RE.is_match(s)
}

/// Username syntax check.
pub const CHECK_USERNAME: Checker = Checker {
    predicate: username_ok,
    hint: "between 2 and 16 characters long",
};

/// Whether `s` is a syntactically valid username.
pub fn check_username(s: &str) -> bool {
    CHECK_USERNAME.check(s)
}

/// Whether `s` is a syntactically valid DNS hostname.
///
/// Requires at least two labels and a top-level label of two or more
/// characters. Labels may contain hyphens but not start or end with one.
pub fn is_valid_hostname(s: &str) -> bool {
    let labels: Vec<&str> = s.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| HOST_LABEL_RE.is_match(label)) {
        return false;
    }
    labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// Whether `s` decodes as hex.
pub fn is_valid_hex(s: &str) -> bool {
    hex::decode(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames() {
        assert!(check_username("alice"));
        assert!(check_username("Al1ce_b"));
        assert!(check_username("ab"));
        assert!(check_username("a234567890123456"));

        assert!(!check_username("a"));
        assert!(!check_username("a2345678901234567"));
        assert!(!check_username("_alice"));
        assert!(!check_username("al__ice"));
        assert!(!check_username("al-ice"));
        assert!(!check_username(""));
        assert_eq!(CHECK_USERNAME.hint, "between 2 and 16 characters long");
    }

    #[test]
    fn test_hostnames() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("a.b.example.co"));
        assert!(is_valid_hostname("my-site.Example.ORG"));

        assert!(!is_valid_hostname("localhost"));
        assert!(!is_valid_hostname("example.c"));
        assert!(!is_valid_hostname("-bad.com"));
        assert!(!is_valid_hostname("bad-.com"));
        assert!(!is_valid_hostname("exa mple.com"));
        assert!(!is_valid_hostname("example..com"));
        assert!(!is_valid_hostname(""));
    }

    #[test]
    fn test_hex() {
        assert!(is_valid_hex("ab12"));
        assert!(is_valid_hex("AB12"));
        assert!(is_valid_hex(""));
        assert!(!is_valid_hex("abc"));
        assert!(!is_valid_hex("zz"));
    }
}
