//! Assertion atoms: single typed identity references
//!
//! An atom is one `key:value` reference such as `keybase:alice`,
//! `uid:0123...`, `dns:example.com`, or `alice@twitter`. The [`AtomKind`] tag
//! decides how the value is normalized, which proof kinds it can be matched
//! against, and how it is resolved.
//!
//! # Normalization
//!
//! | kind | rule | error |
//! |---|---|---|
//! | `Keybase` | lowercase, username syntax | `InvalidUsername` |
//! | `Uid` | hex UID decode, lowercase | `InvalidUid` |
//! | `TeamId` | hex team ID decode, lowercase | `InvalidTeamId` |
//! | `TeamName` | team name decode, canonical form | `InvalidTeamName` |
//! | `Fingerprint` | lowercase, hex | `InvalidHex` |
//! | `Web` `Http` `Https` `Dns` | non-empty, lowercase, hostname | `InvalidHostname` |
//! | `Social` | `AssertionContext::normalize_social_name` | context-defined |

use crate::proof::{Proof, ProofSet};
use crate::social::SocialAssertion;
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use vouch_core::{
    is_valid_hex, is_valid_hostname, AssertionContext, AssertionError, Result, TeamId, TeamName,
    Uid, CHECK_USERNAME, PGP_ASSERTION_KEY, PGP_FINGERPRINT_HEX_LEN,
};

/// Minimum fingerprint length usable as a lookup key.
pub const MIN_FINGERPRINT_LOOKUP_LEN: usize = 4;

/// Kind of identity an atom refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AtomKind {
    /// A local username
    Keybase,
    /// A user ID
    Uid,
    /// A team ID
    TeamId,
    /// A dotted team name
    TeamName,
    /// A host proven over DNS, HTTP, or HTTPS
    Web,
    /// A host proven over HTTP or HTTPS
    Http,
    /// A host proven over HTTPS
    Https,
    /// A host proven over DNS
    Dns,
    /// A full or partial PGP fingerprint
    Fingerprint,
    /// A username on a social service; the service is the atom's key
    Social,
}

impl AtomKind {
    /// Kind implied by an assertion key; unrecognized keys are social services.
    pub fn from_key(key: &str) -> Self {
        match key {
            "keybase" => Self::Keybase,
            "uid" => Self::Uid,
            "tid" => Self::TeamId,
            "team" => Self::TeamName,
            "web" => Self::Web,
            "http" => Self::Http,
            "https" => Self::Https,
            "dns" => Self::Dns,
            PGP_ASSERTION_KEY => Self::Fingerprint,
            _ => Self::Social,
        }
    }

    /// Host-style kinds proven by fetching something remote.
    pub fn is_remote(self) -> bool {
        matches!(self, Self::Web | Self::Http | Self::Https | Self::Dns)
    }

    /// Kinds that name an externally resolvable identity.
    pub fn is_social_convertible(self) -> bool {
        !matches!(
            self,
            Self::Keybase | Self::Uid | Self::TeamId | Self::TeamName
        )
    }

    fn label(self) -> &'static str {
        match self {
            Self::Keybase => "keybase assertion",
            Self::Uid => "uid assertion",
            Self::TeamId => "team id assertion",
            Self::TeamName => "team name assertion",
            Self::Web => "web assertion",
            Self::Http => "http assertion",
            Self::Https => "https assertion",
            Self::Dns => "dns assertion",
            Self::Fingerprint => "fingerprint assertion",
            Self::Social => "social assertion",
        }
    }
}

#[derive(Debug, Clone)]
enum DecodedId {
    Uid(Uid),
    TeamId(TeamId),
    TeamName(TeamName),
}

/// A single typed identity reference.
///
/// Atoms compare and hash by `(kind, key, value)`. The decoded identifier
/// cache of `Uid`, `TeamId` and `TeamName` atoms is derived from `value` and
/// never affects equality.
#[derive(Debug, Clone)]
pub struct Atom {
    kind: AtomKind,
    key: String,
    value: String,
    decoded: OnceCell<DecodedId>,
}

impl Atom {
    /// Build an atom for `key`/`value` and normalize it.
    pub fn normalize(
        ctx: &dyn AssertionContext,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        let kind = AtomKind::from_key(&key);
        Self {
            kind,
            key,
            value: value.into(),
            decoded: OnceCell::new(),
        }
        .normalized(ctx)
    }

    fn normalized(mut self, ctx: &dyn AssertionContext) -> Result<Self> {
        match self.kind {
            AtomKind::Keybase => {
                self.value = self.value.to_lowercase();
                if !CHECK_USERNAME.check(&self.value) {
                    return Err(AssertionError::InvalidUsername {
                        value: self.value,
                        hint: CHECK_USERNAME.hint.to_string(),
                    });
                }
            }
            AtomKind::Uid => {
                let uid = Uid::from_hex(&self.value).map_err(|e| AssertionError::InvalidUid {
                    value: self.value.clone(),
                    reason: e.to_string(),
                })?;
                self.value = self.value.to_lowercase();
                let _ = self.decoded.set(DecodedId::Uid(uid));
            }
            AtomKind::TeamId => {
                let tid =
                    TeamId::from_hex(&self.value).map_err(|e| AssertionError::InvalidTeamId {
                        value: self.value.clone(),
                        reason: e.to_string(),
                    })?;
                self.value = self.value.to_lowercase();
                let _ = self.decoded.set(DecodedId::TeamId(tid));
            }
            AtomKind::TeamName => {
                let name =
                    TeamName::parse(&self.value).map_err(|e| AssertionError::InvalidTeamName {
                        value: self.value.clone(),
                        reason: e.to_string(),
                    })?;
                self.value = name.to_string();
                let _ = self.decoded.set(DecodedId::TeamName(name));
            }
            AtomKind::Fingerprint => {
                self.value = self.value.to_lowercase();
                if !is_valid_hex(&self.value) {
                    return Err(AssertionError::InvalidHex { value: self.value });
                }
            }
            AtomKind::Web | AtomKind::Http | AtomKind::Https | AtomKind::Dns => {
                self.value = self.value.to_lowercase();
                if self.value.is_empty() || !is_valid_hostname(&self.value) {
                    return Err(AssertionError::InvalidHostname {
                        key: self.key,
                        value: self.value,
                    });
                }
            }
            AtomKind::Social => {
                self.value = ctx.normalize_social_name(&self.key, &self.value)?;
            }
        }
        Ok(self)
    }

    /// Kind tag.
    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    /// Assertion key, e.g. `twitter` or `dns`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Normalized value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// `(key, value)` pair.
    pub fn to_key_value_pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }

    /// `key:value`, stable across equal atoms.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.key, self.value)
    }

    /// Whether this is a local username atom.
    pub fn is_keybase(&self) -> bool {
        self.kind == AtomKind::Keybase
    }

    /// Whether this is a user ID atom.
    pub fn is_uid(&self) -> bool {
        self.kind == AtomKind::Uid
    }

    /// Whether this is a team ID atom.
    pub fn is_team_id(&self) -> bool {
        self.kind == AtomKind::TeamId
    }

    /// Whether this is a team name atom.
    pub fn is_team_name(&self) -> bool {
        self.kind == AtomKind::TeamName
    }

    /// Whether this is a social service atom.
    pub fn is_social(&self) -> bool {
        self.kind == AtomKind::Social
    }

    /// Whether this is a web, http, https, or dns atom.
    pub fn is_remote(&self) -> bool {
        self.kind.is_remote()
    }

    /// Whether this is a PGP fingerprint atom.
    pub fn is_fingerprint(&self) -> bool {
        self.kind == AtomKind::Fingerprint
    }

    /// Decoded user ID, for `Uid` atoms whose value decodes.
    pub fn to_uid(&self) -> Option<Uid> {
        if self.kind != AtomKind::Uid {
            return None;
        }
        match self
            .decoded
            .get_or_try_init(|| Uid::from_hex(&self.value).map(DecodedId::Uid))
        {
            Ok(DecodedId::Uid(uid)) => Some(*uid),
            _ => None,
        }
    }

    /// Decoded team ID, for `TeamId` atoms whose value decodes.
    pub fn to_team_id(&self) -> Option<TeamId> {
        if self.kind != AtomKind::TeamId {
            return None;
        }
        match self
            .decoded
            .get_or_try_init(|| TeamId::from_hex(&self.value).map(DecodedId::TeamId))
        {
            Ok(DecodedId::TeamId(tid)) => Some(*tid),
            _ => None,
        }
    }

    /// Decoded team name, for `TeamName` atoms whose value decodes.
    pub fn to_team_name(&self) -> Option<TeamName> {
        if self.kind != AtomKind::TeamName {
            return None;
        }
        match self
            .decoded
            .get_or_try_init(|| TeamName::parse(&self.value).map(DecodedId::TeamName))
        {
            Ok(DecodedId::TeamName(name)) => Some(name.clone()),
            _ => None,
        }
    }

    /// Proof kinds this atom can be satisfied by.
    pub fn matches_proof_kind_keys(&self) -> Vec<&str> {
        match self.kind {
            AtomKind::Web => vec!["dns", "http", "https"],
            AtomKind::Http => vec!["http", "https"],
            _ => vec![self.key.as_str()],
        }
    }

    /// Whether `proof` proves this atom.
    ///
    /// Fingerprints match on suffix so a partial fingerprint matches the full
    /// key fingerprint it ends.
    pub fn match_proof(&self, proof: &Proof) -> bool {
        let proven = proof.value.to_lowercase();
        match self.kind {
            AtomKind::Fingerprint => proven.ends_with(self.value.as_str()),
            _ => proven == self.value,
        }
    }

    /// Whether any proof in `proofs` of a matching kind proves this atom.
    pub fn matches(&self, proofs: &ProofSet) -> bool {
        proofs
            .lookup(&self.matches_proof_kind_keys())
            .into_iter()
            .any(|proof| self.match_proof(proof))
    }

    /// View this atom as an externally resolvable `(service, user)` pair.
    pub fn to_social_assertion(&self) -> Result<SocialAssertion> {
        if !self.kind.is_social_convertible() {
            return Err(AssertionError::not_convertible(self.kind.label()));
        }
        Ok(SocialAssertion::new(self.key.as_str(), self.value.as_str()))
    }

    /// Key/value pair used to resolve this atom to a user.
    pub fn to_lookup_key(&self) -> Result<(String, String)> {
        let key = match self.kind {
            AtomKind::Keybase => "username",
            AtomKind::Uid => "uid",
            AtomKind::TeamId => "tid",
            AtomKind::TeamName => "team",
            AtomKind::Web => "web",
            AtomKind::Http => "http",
            AtomKind::Https => "https",
            AtomKind::Dns => "dns",
            AtomKind::Social => self.key.as_str(),
            AtomKind::Fingerprint => {
                let len = self.value.len();
                if len < MIN_FINGERPRINT_LOOKUP_LEN {
                    return Err(AssertionError::FingerprintTooShort {
                        value: self.value.clone(),
                    });
                }
                if len == PGP_FINGERPRINT_HEX_LEN {
                    "key_fingerprint"
                } else if len < PGP_FINGERPRINT_HEX_LEN {
                    "key_suffix"
                } else {
                    return Err(AssertionError::FingerprintTooLong {
                        value: self.value.clone(),
                    });
                }
            }
        };
        Ok((key.to_string(), self.value.clone()))
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.key == other.key && self.value == other.value
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.key.hash(state);
        self.value.hash(state);
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AtomKind::Keybase => f.write_str(&self.value),
            _ => write!(f, "{}@{}", self.value, self.key),
        }
    }
}
