//! Identifier codecs for user IDs, team IDs, and team names
//!
//! UIDs and team IDs are 16-byte values written as 32 lowercase hex
//! characters. The final byte is a type suffix that distinguishes user IDs
//! from the various team ID flavors, so a string that decodes as hex is not
//! automatically a valid identifier of either kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Byte length of a UID or team ID.
pub const ID_LEN: usize = 16;

/// Hex length of a UID or team ID.
pub const ID_HEX_LEN: usize = ID_LEN * 2;

/// Hex length of a full PGP fingerprint.
pub const PGP_FINGERPRINT_HEX_LEN: usize = 40;

/// Assertion key for PGP fingerprint assertions.
pub const PGP_ASSERTION_KEY: &str = "fingerprint";

/// Suffix byte of a regular UID.
pub const UID_SUFFIX: u8 = 0x00;

/// Suffix byte of a UID minted after the suffix migration.
pub const UID_SUFFIX_2: u8 = 0x19;

/// Suffix byte of a private root team.
pub const TEAM_ID_PRIVATE_SUFFIX: u8 = 0x24;

/// Suffix byte of a public root team.
pub const TEAM_ID_PUBLIC_SUFFIX: u8 = 0x25;

/// Suffix byte of a private subteam.
pub const SUB_TEAM_ID_PRIVATE_SUFFIX: u8 = 0x26;

/// Suffix byte of a public subteam.
pub const SUB_TEAM_ID_PUBLIC_SUFFIX: u8 = 0x27;

/// Maximum number of dot-separated parts in a team name.
pub const TEAM_NAME_MAX_DEPTH: usize = 16;

/// Errors from decoding identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Input is not hex.
    #[error("not a hex string")]
    BadHex,

    /// Decoded length is wrong.
    #[error("wrong length: expected {expected} bytes, got {actual}")]
    BadLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Type suffix byte does not match the identifier kind.
    #[error("bad type suffix 0x{0:02x}")]
    BadSuffix(u8),

    /// Team name with no parts.
    #[error("empty team name")]
    EmptyTeamName,

    /// Team name nested too deeply.
    #[error("team name has {0} parts, at most {TEAM_NAME_MAX_DEPTH} allowed")]
    TooDeep(usize),

    /// A team name part failed the name syntax check.
    #[error("bad team name part '{0}'")]
    BadTeamNamePart(String),
}

fn decode_id(s: &str) -> Result<[u8; ID_LEN], IdentifierError> {
    let bytes = hex::decode(s).map_err(|_| IdentifierError::BadHex)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| IdentifierError::BadLength {
        expected: ID_LEN,
        actual,
    })
}

/// User identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid([u8; ID_LEN]);

impl Uid {
    /// Decode a UID from its hex form.
    pub fn from_hex(s: &str) -> Result<Self, IdentifierError> {
        let bytes = decode_id(s)?;
        match bytes[ID_LEN - 1] {
            UID_SUFFIX | UID_SUFFIX_2 => Ok(Self(bytes)),
            other => Err(IdentifierError::BadSuffix(other)),
        }
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Uid {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId([u8; ID_LEN]);

impl TeamId {
    /// Decode a team ID from its hex form.
    pub fn from_hex(s: &str) -> Result<Self, IdentifierError> {
        let bytes = decode_id(s)?;
        match bytes[ID_LEN - 1] {
            TEAM_ID_PRIVATE_SUFFIX
            | TEAM_ID_PUBLIC_SUFFIX
            | SUB_TEAM_ID_PRIVATE_SUFFIX
            | SUB_TEAM_ID_PUBLIC_SUFFIX => Ok(Self(bytes)),
            other => Err(IdentifierError::BadSuffix(other)),
        }
    }

    /// Whether this ID names a public team.
    pub fn is_public(&self) -> bool {
        matches!(
            self.0[ID_LEN - 1],
            TEAM_ID_PUBLIC_SUFFIX | SUB_TEAM_ID_PUBLIC_SUFFIX
        )
    }

    /// Whether this ID names a subteam.
    pub fn is_sub_team(&self) -> bool {
        matches!(
            self.0[ID_LEN - 1],
            SUB_TEAM_ID_PRIVATE_SUFFIX | SUB_TEAM_ID_PUBLIC_SUFFIX
        )
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for TeamId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Dotted team name such as `acme.eng.infra`
///
/// Parts are stored lowercased; the canonical string joins them with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamName {
    parts: Vec<String>,
}

impl TeamName {
    /// Parse and canonicalize a team name.
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        if s.is_empty() {
            return Err(IdentifierError::EmptyTeamName);
        }
        let parts: Vec<String> = s.split('.').map(str::to_lowercase).collect();
        if parts.len() > TEAM_NAME_MAX_DEPTH {
            return Err(IdentifierError::TooDeep(parts.len()));
        }
        if let Some(bad) = parts
            .iter()
            .find(|part| !crate::validation::check_username(part))
        {
            return Err(IdentifierError::BadTeamNamePart(bad.clone()));
        }
        Ok(Self { parts })
    }

    /// Name parts from root to leaf.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Root team name.
    pub fn root(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or_default()
    }

    /// Number of parts; 1 for a root team.
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    /// Whether this is a root (non-sub) team.
    pub fn is_root_team(&self) -> bool {
        self.parts.len() == 1
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

impl FromStr for TeamName {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
