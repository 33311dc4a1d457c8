//! Verified proofs and the proof set atoms are matched against

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One verified claim, e.g. `{key: "twitter", value: "alice"}`.
///
/// Proofs arrive from the verification pipeline with `value` already
/// normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    /// Proof kind
    pub key: String,
    /// Proven identity on that kind
    pub value: String,
}

impl Proof {
    /// Create a proof.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Proofs grouped by kind, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSet {
    proofs: IndexMap<String, Vec<Proof>>,
}

impl ProofSet {
    /// Build a proof set from a batch of proofs.
    pub fn new(proofs: impl IntoIterator<Item = Proof>) -> Self {
        let mut set = Self::default();
        for proof in proofs {
            set.add(proof);
        }
        set
    }

    /// Append a proof under its key.
    pub fn add(&mut self, proof: Proof) {
        self.proofs.entry(proof.key.clone()).or_default().push(proof);
    }

    /// All proofs stored under any of `keys`, grouped in `keys` order.
    ///
    /// Unknown keys contribute nothing.
    pub fn lookup(&self, keys: &[&str]) -> Vec<&Proof> {
        keys.iter()
            .filter_map(|key| self.proofs.get(*key))
            .flatten()
            .collect()
    }

    /// Proof kinds present, in first-arrival order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.proofs.keys().map(String::as_str)
    }

    /// Total number of proofs.
    pub fn len(&self) -> usize {
        self.proofs.values().map(Vec::len).sum()
    }

    /// Whether the set holds no proofs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Proof> for ProofSet {
    fn from_iter<I: IntoIterator<Item = Proof>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Extend<Proof> for ProofSet {
    fn extend<I: IntoIterator<Item = Proof>>(&mut self, iter: I) {
        for proof in iter {
            self.add(proof);
        }
    }
}
