//! Configuration for social service normalization
//!
//! The social service table decides which `service` keys an assertion may
//! name and how usernames on each service are normalized. It can be loaded
//! from TOML or JSON, layered with another table, and trimmed through the
//! environment.

use crate::errors::{AssertionError, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Environment variable listing services to disable (comma separated).
pub const DISABLED_SERVICES_ENV: &str = "VOUCH_DISABLED_SERVICES";

/// Assertion keys with built-in meaning that no social service may claim.
pub const RESERVED_ASSERTION_KEYS: &[&str] = &[
    "keybase",
    "uid",
    "tid",
    "team",
    "web",
    "http",
    "https",
    "dns",
    crate::identifiers::PGP_ASSERTION_KEY,
];

/// Username rules for one social service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialServiceConfig {
    /// Service key as written in assertions (`twitter` in `alice@twitter`)
    pub name: String,
    /// Pattern a lowercased username must match (case-insensitive)
    pub username_pattern: String,
    /// Minimum username length in characters
    #[serde(default = "default_min_len")]
    pub min_len: usize,
    /// Maximum username length in characters
    pub max_len: usize,
    /// Prefix stripped before validation, e.g. `@` for handles
    #[serde(default)]
    pub strip_prefix: Option<String>,
    /// Hint shown when a username is rejected
    #[serde(default)]
    pub hint: Option<String>,
}

fn default_min_len() -> usize {
    1
}

impl SocialServiceConfig {
    /// Create a service entry without prefix or hint.
    pub fn new(
        name: impl Into<String>,
        username_pattern: impl Into<String>,
        min_len: usize,
        max_len: usize,
    ) -> Self {
        Self {
            name: name.into(),
            username_pattern: username_pattern.into(),
            min_len,
            max_len,
            strip_prefix: None,
            hint: None,
        }
    }

    /// Set the stripped prefix.
    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = Some(prefix.into());
        self
    }

    /// Set the rejection hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Top-level assertion engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionConfig {
    /// Known social services
    #[serde(default)]
    pub services: Vec<SocialServiceConfig>,
}

impl Default for AssertionConfig {
    fn default() -> Self {
        Self {
            services: vec![
                SocialServiceConfig::new("twitter", r"^[a-z0-9_]+$", 1, 15)
                    .with_strip_prefix("@")
                    .with_hint("alphanumerics and underscores, up to 15 characters"),
                SocialServiceConfig::new("github", r"^[a-z0-9][a-z0-9-]*$", 1, 39)
                    .with_hint("alphanumerics and dashes, up to 39 characters"),
                SocialServiceConfig::new("reddit", r"^[a-z0-9_-]+$", 3, 20)
                    .with_hint("between 3 and 20 characters"),
                SocialServiceConfig::new("hackernews", r"^[a-z0-9_-]+$", 2, 15)
                    .with_hint("between 2 and 15 characters"),
                SocialServiceConfig::new("facebook", r"^[a-z0-9.]+$", 1, 50)
                    .with_hint("alphanumerics and dots, up to 50 characters"),
                SocialServiceConfig::new("rooter", r"^[a-z0-9_]+$", 1, 20)
                    .with_hint("alphanumerics and underscores, up to 20 characters"),
            ],
        }
    }
}

impl AssertionConfig {
    /// Configuration with no social services.
    pub fn empty() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Load configuration from a `.toml` or `.json` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AssertionError::config(format!("Failed to read config file: {e}"))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| AssertionError::config(format!("Invalid JSON: {e}"))),
            _ => Err(AssertionError::config("Unsupported file format")),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AssertionError::config(format!("Invalid TOML: {e}")))
    }

    /// Layer `other` on top of this configuration.
    ///
    /// Services in `other` replace same-named services here; new services are
    /// appended in `other`'s order.
    pub fn merge_with(&mut self, other: &Self) {
        for service in &other.services {
            match self.services.iter_mut().find(|s| s.name == service.name) {
                Some(existing) => *existing = service.clone(),
                None => self.services.push(service.clone()),
            }
        }
    }

    /// Apply environment overrides.
    pub fn merge_with_env(&mut self) {
        let disabled = std::env::var(DISABLED_SERVICES_ENV).ok();
        self.disable_services(disabled.as_deref().unwrap_or_default());
    }

    /// Remove every service named in a comma-separated list.
    pub fn disable_services(&mut self, list: &str) {
        let disabled: HashSet<String> = list
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        self.services.retain(|s| !disabled.contains(&s.name));
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for service in &self.services {
            let name = service.name.as_str();
            if name.is_empty() {
                return Err(AssertionError::config("Service name cannot be empty"));
            }
            if name != name.to_lowercase() {
                return Err(AssertionError::config(format!(
                    "Service name must be lowercase: {name}"
                )));
            }
            if RESERVED_ASSERTION_KEYS.contains(&name) {
                return Err(AssertionError::config(format!(
                    "Service name is a reserved assertion key: {name}"
                )));
            }
            if !seen.insert(name) {
                return Err(AssertionError::config(format!("Duplicate service: {name}")));
            }
            if service.min_len > service.max_len {
                return Err(AssertionError::config(format!(
                    "Service {} has min_len {} greater than max_len {}",
                    name, service.min_len, service.max_len
                )));
            }
            RegexBuilder::new(&service.username_pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    AssertionError::config(format!("Service {name} has a bad pattern: {e}"))
                })?;
        }
        Ok(())
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&SocialServiceConfig> {
        self.services.iter().find(|s| s.name == name)
    }
}
