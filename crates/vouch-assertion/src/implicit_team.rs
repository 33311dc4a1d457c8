//! Implicit team display names
//!
//! An implicit team is named by its members rather than registered under a
//! name. The display name grammar is
//!
//! ```text
//! writer[,writer...][#reader[,reader...]][ (conflicted YYYY-MM-DD[ #N])]
//! ```
//!
//! where each member is either a bare username or a typed assertion such as
//! `bob@twitter`. Member lists are de-duplicated across writers and readers
//! (first occurrence wins) and then sorted, so two spellings of the same team
//! parse to equal values.

use crate::parser::parse_atom;
use crate::social::SocialAssertion;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use tracing::{debug, trace};
use vouch_core::{check_username, AssertionContext, AssertionError, Result};

const KEYBASE_SERVICE: &str = "keybase";

const SUFFIX_DATE_FORMAT: &str = "%Y-%m-%d";

#[allow(clippy::expect_used)] // literal pattern
static CONFLICT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(conflicted ([0-9]{4}-[0-9]{2}-[0-9]{2})( #([0-9]+))?\)$")
        .expect("conflict suffix pattern")
});

/// Writers or readers of an implicit team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplicitTeamUserSet {
    /// Local usernames, ascending
    pub keybase_users: Vec<String>,
    /// Identities on other services, ascending by `service:user`
    pub unresolved_users: Vec<SocialAssertion>,
}

impl ImplicitTeamUserSet {
    /// Total number of members.
    pub fn num_total_users(&self) -> usize {
        self.keybase_users.len() + self.unresolved_users.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.num_total_users() == 0
    }

    fn sort(&mut self) {
        self.keybase_users.sort();
        self.unresolved_users.sort();
    }
}

impl fmt::Display for ImplicitTeamUserSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members = self
            .keybase_users
            .iter()
            .cloned()
            .chain(self.unresolved_users.iter().map(ToString::to_string))
            .collect::<Vec<_>>();
        f.write_str(&members.join(","))
    }
}

/// Disambiguation marker for implicit teams sharing a member set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplicitTeamConflictInfo {
    /// Conflict generation, starting at 1
    pub generation: NonZeroU32,
    /// Conflict date at UTC midnight
    pub time: DateTime<Utc>,
}

/// A parsed implicit team display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplicitTeamDisplayName {
    /// Whether the team is public
    pub is_public: bool,
    /// Conflict suffix, if any
    pub conflict_info: Option<ImplicitTeamConflictInfo>,
    /// Members with write access
    pub writers: ImplicitTeamUserSet,
    /// Members with read-only access
    pub readers: ImplicitTeamUserSet,
}

impl fmt::Display for ImplicitTeamDisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.writers)?;
        if !self.readers.is_empty() {
            write!(f, "#{}", self.readers)?;
        }
        if let Some(conflict) = &self.conflict_info {
            write!(f, " {}", format_conflict_suffix(conflict))?;
        }
        Ok(())
    }
}

/// Parse a display name such as `alice,bob@twitter#carol (conflicted 2017-03-04 #2)`.
///
/// Matching is case-insensitive; the whole input is lowercased first.
pub fn parse_implicit_team_display_name(
    ctx: &dyn AssertionContext,
    name: &str,
    is_public: bool,
) -> Result<ImplicitTeamDisplayName> {
    let name = name.to_lowercase();

    let (assertions, suffix) = match name.split_once(' ') {
        Some((assertions, suffix)) => (assertions, Some(suffix)),
        None => (name.as_str(), None),
    };

    let lists: Vec<&str> = assertions.split('#').collect();
    if lists.len() > 2 {
        return Err(AssertionError::TooManySeparators);
    }

    let mut seen = HashSet::new();
    let writers = parse_implicit_team_user_set(ctx, lists[0], &mut seen)?;
    if writers.is_empty() {
        return Err(AssertionError::NoWriters);
    }

    let readers = match lists.get(1) {
        Some(list) => parse_implicit_team_user_set(ctx, list, &mut seen)?,
        None => ImplicitTeamUserSet::default(),
    };

    let conflict_info = match suffix {
        Some("") => return Err(AssertionError::EmptySuffix),
        Some(suffix) => Some(parse_conflict_suffix(suffix)?),
        None => None,
    };

    trace!(
        writers = writers.num_total_users(),
        readers = readers.num_total_users(),
        conflicted = conflict_info.is_some(),
        "Parsed implicit team display name"
    );

    Ok(ImplicitTeamDisplayName {
        is_public,
        conflict_info,
        writers,
        readers,
    })
}

/// Parse a comma-separated member list.
///
/// Members already in `seen` (keyed by `service:user`) are skipped, and every
/// new member is added to it, so one `seen` set shared across the writer and
/// reader lists keeps each person in whichever list named them first.
pub fn parse_implicit_team_user_set(
    ctx: &dyn AssertionContext,
    list: &str,
    seen: &mut HashSet<String>,
) -> Result<ImplicitTeamUserSet> {
    let mut set = ImplicitTeamUserSet::default();

    for part in list.split(',') {
        let member = parse_implicit_team_part(ctx, part)?;
        if !seen.insert(member.canonical()) {
            trace!(member = %member, "Skipping duplicate implicit team member");
            continue;
        }
        if member.service == KEYBASE_SERVICE {
            set.keybase_users.push(member.user);
        } else {
            set.unresolved_users.push(member);
        }
    }

    set.sort();
    Ok(set)
}

fn parse_implicit_team_part(ctx: &dyn AssertionContext, part: &str) -> Result<SocialAssertion> {
    let delimiters = part.matches([':', '@']).count();
    match delimiters {
        0 => {
            if !check_username(part) {
                debug!(part = %part, "Rejected implicit team username");
                return Err(AssertionError::invalid_part(part, "invalid username"));
            }
            Ok(SocialAssertion::new(KEYBASE_SERVICE, part.to_lowercase()))
        }
        1 => {
            let atom = parse_atom(ctx, part, true)
                .map_err(|err| AssertionError::invalid_part(part, err.to_string()))?;
            Ok(SocialAssertion::new(atom.key(), atom.value()))
        }
        _ => Err(AssertionError::invalid_part(
            part,
            "can have at most one ':' xor '@'",
        )),
    }
}

/// Parse a `(conflicted YYYY-MM-DD[ #N])` suffix.
///
/// A missing generation means generation 1.
pub fn parse_conflict_suffix(suffix: &str) -> Result<ImplicitTeamConflictInfo> {
    if suffix.is_empty() {
        return Err(AssertionError::EmptySuffix);
    }

    let captures = CONFLICT_SUFFIX_RE
        .captures(suffix)
        .ok_or_else(|| AssertionError::bad_suffix(suffix))?;

    let date = captures
        .get(1)
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), SUFFIX_DATE_FORMAT).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AssertionError::bad_suffix(suffix))?;

    let generation = match captures.get(3) {
        None => NonZeroU32::MIN,
        Some(m) => m
            .as_str()
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| AssertionError::BadGeneration {
                generation: m.as_str().to_string(),
            })?,
    };

    Ok(ImplicitTeamConflictInfo {
        generation,
        time: Utc.from_utc_datetime(&date),
    })
}

/// Render a conflict suffix; the generation is always written out.
pub fn format_conflict_suffix(conflict: &ImplicitTeamConflictInfo) -> String {
    format!(
        "(conflicted {} #{})",
        conflict.time.format(SUFFIX_DATE_FORMAT),
        conflict.generation
    )
}
