//! Assertion error types
//!
//! A single error type covers every way an assertion string, implicit team
//! name, or team path can be rejected. Each variant carries the offending
//! input so callers can render a user-facing message without re-parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing, normalizing, or analyzing assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum AssertionError {
    /// Token does not start with a character any split rule accepts.
    #[error("invalid key-value identity: {input}")]
    InvalidSyntax {
        /// The rejected token
        input: String,
    },

    /// Strict parse of a token that names no type.
    #[error("bad assertion, no 'type' given: {value}")]
    MissingType {
        /// The untyped value
        value: String,
    },

    /// Keybase username failed the username syntax check.
    #[error("bad keybase username '{value}': {hint}")]
    InvalidUsername {
        /// The rejected username
        value: String,
        /// Validator hint
        hint: String,
    },

    /// Host-style assertion with an empty or malformed hostname.
    #[error("invalid hostname for {key}: '{value}'")]
    InvalidHostname {
        /// Assertion key (web, http, https, dns)
        key: String,
        /// The rejected hostname
        value: String,
    },

    /// Fingerprint that is not a valid hex string.
    #[error("bad hex string: '{value}'")]
    InvalidHex {
        /// The rejected value
        value: String,
    },

    /// UID that failed to decode.
    #[error("invalid uid '{value}': {reason}")]
    InvalidUid {
        /// The rejected value
        value: String,
        /// Decoder failure
        reason: String,
    },

    /// Team ID that failed to decode.
    #[error("invalid team id '{value}': {reason}")]
    InvalidTeamId {
        /// The rejected value
        value: String,
        /// Decoder failure
        reason: String,
    },

    /// Team name that failed to decode.
    #[error("invalid team name '{value}': {reason}")]
    InvalidTeamName {
        /// The rejected value
        value: String,
        /// Decoder failure
        reason: String,
    },

    /// Social assertion naming a service the context does not know.
    #[error("unknown social network: {service}")]
    UnknownService {
        /// The unrecognized service key
        service: String,
    },

    /// Social username rejected by its service's rules.
    #[error("bad {service} username '{value}': {hint}")]
    InvalidSocialName {
        /// Service key
        service: String,
        /// The rejected username
        value: String,
        /// Service-specific hint
        hint: String,
    },

    /// Expression or atom cannot be viewed as a single social assertion.
    #[error("cannot convert {what} to a social assertion")]
    NotConvertible {
        /// What was being converted
        what: String,
    },

    /// Fingerprint too short to use as a lookup key.
    #[error("fingerprint queries must be at least 2 bytes long: '{value}'")]
    FingerprintTooShort {
        /// The fingerprint value
        value: String,
    },

    /// Fingerprint longer than a full PGP fingerprint.
    #[error("bad fingerprint; too long: {value}")]
    FingerprintTooLong {
        /// The fingerprint value
        value: String,
    },

    /// Implicit team name with more than one `#`.
    #[error("implicit team name can have at most one '#' separator")]
    TooManySeparators,

    /// Implicit team name without any writer.
    #[error("implicit team name needs at least one writer")]
    NoWriters,

    /// A writer/reader entry that is neither a username nor an assertion.
    #[error("invalid implicit team part '{part}': {reason}")]
    InvalidPart {
        /// The rejected part
        part: String,
        /// Why it was rejected
        reason: String,
    },

    /// Space-separated suffix present but empty.
    #[error("implicit team name has an empty suffix")]
    EmptySuffix,

    /// Suffix not of the form `(conflicted YYYY-MM-DD[ #N])`.
    #[error("malformed implicit team suffix: '{suffix}'")]
    BadSuffix {
        /// The rejected suffix
        suffix: String,
    },

    /// Conflict generation that is not a positive integer.
    #[error("malformed implicit team suffix generation: {generation}")]
    BadGeneration {
        /// The rejected generation text
        generation: String,
    },

    /// Path not of the form `/keybase/<kind>/<name>`.
    #[error("invalid team TLF path '{path}': {reason}")]
    InvalidTlfPath {
        /// The rejected path
        path: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl AssertionError {
    /// Create an invalid syntax error.
    pub fn invalid_syntax(input: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            input: input.into(),
        }
    }

    /// Create a not convertible error.
    pub fn not_convertible(what: impl Into<String>) -> Self {
        Self::NotConvertible { what: what.into() }
    }

    /// Create an invalid implicit team part error.
    pub fn invalid_part(part: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPart {
            part: part.into(),
            reason: reason.into(),
        }
    }

    /// Create a bad suffix error.
    pub fn bad_suffix(suffix: impl Into<String>) -> Self {
        Self::BadSuffix {
            suffix: suffix.into(),
        }
    }

    /// Create an invalid TLF path error.
    pub fn invalid_tlf_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTlfPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors raised by the implicit team name grammar.
    pub fn is_implicit_team_error(&self) -> bool {
        matches!(
            self,
            Self::TooManySeparators
                | Self::NoWriters
                | Self::InvalidPart { .. }
                | Self::EmptySuffix
                | Self::BadSuffix { .. }
                | Self::BadGeneration { .. }
        )
    }

    /// True for errors raised by the conflict suffix grammar.
    pub fn is_suffix_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySuffix | Self::BadSuffix { .. } | Self::BadGeneration { .. }
        )
    }
}

/// Standard Result type for assertion operations
pub type Result<T> = std::result::Result<T, AssertionError>;

impl From<std::io::Error> for AssertionError {
    fn from(err: std::io::Error) -> Self {
        Self::config(err.to_string())
    }
}
