//! Assertion context: the social-name normalization hook
//!
//! Parsing a social assertion such as `alice@twitter` needs service-specific
//! rules that live outside the parser. The parser asks an [`AssertionContext`]
//! for them; [`SocialServiceRegistry`] is the table-driven implementation
//! built from [`AssertionConfig`].

use crate::config::AssertionConfig;
use crate::errors::{AssertionError, Result};
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Capability the parser uses to normalize social usernames.
///
/// Implementations must be deterministic for a given input.
pub trait AssertionContext: Send + Sync {
    /// Validate `username` for `service` and return its normalized form.
    fn normalize_social_name(&self, service: &str, username: &str) -> Result<String>;
}

impl<T: AssertionContext + ?Sized> AssertionContext for &T {
    fn normalize_social_name(&self, service: &str, username: &str) -> Result<String> {
        (**self).normalize_social_name(service, username)
    }
}

impl<T: AssertionContext + ?Sized> AssertionContext for Box<T> {
    fn normalize_social_name(&self, service: &str, username: &str) -> Result<String> {
        (**self).normalize_social_name(service, username)
    }
}

impl<T: AssertionContext + ?Sized> AssertionContext for std::sync::Arc<T> {
    fn normalize_social_name(&self, service: &str, username: &str) -> Result<String> {
        (**self).normalize_social_name(service, username)
    }
}

#[derive(Debug, Clone)]
struct CompiledService {
    name: String,
    pattern: Regex,
    min_len: usize,
    max_len: usize,
    strip_prefix: Option<String>,
    hint: String,
}

impl CompiledService {
    fn normalize(&self, username: &str) -> Result<String> {
        let stripped = match &self.strip_prefix {
            Some(prefix) => username.strip_prefix(prefix.as_str()).unwrap_or(username),
            None => username,
        };
        let name = stripped.to_lowercase();
        let len = name.chars().count();
        if len < self.min_len || len > self.max_len || !self.pattern.is_match(&name) {
            debug!(
                service = %self.name,
                username = %username,
                "Rejected social username"
            );
            return Err(AssertionError::InvalidSocialName {
                service: self.name.clone(),
                value: username.to_string(),
                hint: self.hint.clone(),
            });
        }
        Ok(name)
    }
}

/// Table of known social services compiled from configuration.
#[derive(Debug, Clone)]
pub struct SocialServiceRegistry {
    services: Vec<CompiledService>,
}

impl SocialServiceRegistry {
    /// Validate `config` and compile its service table.
    pub fn from_config(config: &AssertionConfig) -> Result<Self> {
        config.validate()?;
        let services = config
            .services
            .iter()
            .map(|service| {
                let pattern = RegexBuilder::new(&service.username_pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| AssertionError::config(e.to_string()))?;
                let hint = service.hint.clone().unwrap_or_else(|| {
                    format!(
                        "between {} and {} characters long",
                        service.min_len, service.max_len
                    )
                });
                Ok(CompiledService {
                    name: service.name.clone(),
                    pattern,
                    min_len: service.min_len,
                    max_len: service.max_len,
                    strip_prefix: service.strip_prefix.clone(),
                    hint,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { services })
    }

    /// Whether `service` is a known social service.
    pub fn knows(&self, service: &str) -> bool {
        self.services.iter().any(|s| s.name == service)
    }

    /// Known service names in configuration order.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|s| s.name.as_str())
    }
}

impl Default for SocialServiceRegistry {
    fn default() -> Self {
        match Self::from_config(&AssertionConfig::default()) {
            Ok(registry) => registry,
            Err(_) => Self {
                services: Vec::new(),
            },
        }
    }
}

impl AssertionContext for SocialServiceRegistry {
    fn normalize_social_name(&self, service: &str, username: &str) -> Result<String> {
        match self.services.iter().find(|s| s.name == service) {
            Some(compiled) => compiled.normalize(username),
            None => {
                debug!(service = %service, "Unknown social service");
                Err(AssertionError::UnknownService {
                    service: service.to_string(),
                })
            }
        }
    }
}
