//! Atom parser: one assertion token to one normalized [`Atom`]
//!
//! Accepted token shapes, tried in order:
//!
//! 1. `key:value` (a leading `//` on the value is dropped, so `dns://host`
//!    works)
//! 2. `value@key`
//! 3. `value` with no key

use crate::atom::Atom;
use tracing::{debug, trace};
use vouch_core::{AssertionContext, AssertionError, Result};

/// Key an untyped token gets in non-strict mode.
pub const DEFAULT_KEY: &str = "keybase";

fn starts_like_assertion(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || "@:/_-".contains(c))
}

/// Split a token into a lowercased key and a raw value.
///
/// The key is empty when the token has neither `:` nor `@`.
pub fn parse_key_value(token: &str) -> Result<(String, String)> {
    if !starts_like_assertion(token) {
        debug!(token = %token, "Rejected assertion token");
        return Err(AssertionError::invalid_syntax(token));
    }

    let (key, value) = if let Some((key, value)) = token.split_once(':') {
        (key, value.strip_prefix("//").unwrap_or(value))
    } else if let Some((value, key)) = token.split_once('@') {
        (key, value)
    } else {
        ("", token)
    };
    Ok((key.to_lowercase(), value.to_string()))
}

/// Parse one assertion token into a normalized atom.
///
/// In strict mode a token without a key is an error; otherwise it is taken
/// as a local username.
pub fn parse_atom(ctx: &dyn AssertionContext, token: &str, strict: bool) -> Result<Atom> {
    let (key, value) = parse_key_value(token)?;
    parse_atom_key_value(ctx, &key, &value, strict)
}

/// Build and normalize an atom from an already split key and value.
pub fn parse_atom_key_value(
    ctx: &dyn AssertionContext,
    key: &str,
    value: &str,
    strict: bool,
) -> Result<Atom> {
    let key = if key.is_empty() {
        if strict {
            return Err(AssertionError::MissingType {
                value: value.to_string(),
            });
        }
        DEFAULT_KEY
    } else {
        key
    };

    let atom = Atom::normalize(ctx, key, value).map_err(|err| {
        debug!(key = %key, value = %value, error = %err, "Assertion failed normalization");
        err
    })?;
    trace!(kind = ?atom.kind(), atom = %atom, "Parsed assertion atom");
    Ok(atom)
}
