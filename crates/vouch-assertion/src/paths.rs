//! Filesystem paths that name teams
//!
//! - `/keybase/private/<display-name>` and `/keybase/public/<display-name>`
//!   name implicit teams
//! - `/keybase/team/<team-name>` names a registered team

use crate::implicit_team::{parse_implicit_team_display_name, ImplicitTeamDisplayName};
use tracing::debug;
use vouch_core::{AssertionContext, AssertionError, Result, TeamName};

const PATH_ROOT: &str = "keybase";
const PRIVATE_FOLDER: &str = "private";
const PUBLIC_FOLDER: &str = "public";
const TEAM_FOLDER: &str = "team";

/// Lowercase `/keybase/<folder>/<name>` and return `(folder, name)`.
fn split_path(path: &str) -> Result<(String, String)> {
    let lowered = path.to_lowercase();
    let parts: Vec<&str> = lowered.split('/').collect();
    let [empty, root, folder, name] = parts.as_slice() else {
        debug!(path = %path, parts = parts.len(), "Rejected team path");
        return Err(AssertionError::invalid_tlf_path(path, "must have four parts"));
    };
    if !empty.is_empty() || *root != PATH_ROOT {
        return Err(AssertionError::invalid_tlf_path(
            path,
            "must start with /keybase/",
        ));
    }
    Ok((folder.to_string(), name.to_string()))
}

/// Parse an implicit team folder path such as
/// `/keybase/private/alice,bob@twitter#carol`.
///
/// The folder decides visibility; the last component goes through the
/// display name parser and its errors are returned as-is.
pub fn parse_tlf_path(ctx: &dyn AssertionContext, path: &str) -> Result<ImplicitTeamDisplayName> {
    let (folder, name) = split_path(path)?;
    let is_public = match folder.as_str() {
        PUBLIC_FOLDER => true,
        PRIVATE_FOLDER => false,
        _ => {
            return Err(AssertionError::invalid_tlf_path(
                path,
                "folder must be private or public",
            ))
        }
    };
    parse_implicit_team_display_name(ctx, &name, is_public)
}

/// Parse a team folder path such as `/keybase/team/acme.eng`.
pub fn parse_team_kbfs_path(path: &str) -> Result<TeamName> {
    let (folder, name) = split_path(path)?;
    if folder != TEAM_FOLDER {
        return Err(AssertionError::invalid_tlf_path(
            path,
            "folder must be team",
        ));
    }
    TeamName::parse(&name).map_err(|e| AssertionError::InvalidTeamName {
        value: name.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use vouch_core::SocialServiceRegistry;

    #[test]
    fn test_tlf_visibility() {
        let ctx = SocialServiceRegistry::default();
        let private = parse_tlf_path(&ctx, "/keybase/private/alice,bob").unwrap();
        assert!(!private.is_public);
        assert_eq!(private.writers.keybase_users, ["alice", "bob"]);

        let public = parse_tlf_path(&ctx, "/Keybase/PUBLIC/Alice").unwrap();
        assert!(public.is_public);
        assert_eq!(public.writers.keybase_users, ["alice"]);
    }

    #[test]
    fn test_tlf_with_readers_and_conflict() {
        let ctx = SocialServiceRegistry::default();
        let parsed = parse_tlf_path(
            &ctx,
            "/keybase/private/mlsteele,malgorithms@twitter#bot (conflicted 2017-03-04 #2)",
        )
        .unwrap();
        assert_eq!(parsed.writers.keybase_users, ["mlsteele"]);
        assert_eq!(parsed.writers.unresolved_users.len(), 1);
        assert_eq!(parsed.readers.keybase_users, ["bot"]);
        assert_eq!(parsed.conflict_info.unwrap().generation.get(), 2);
    }

    #[test]
    fn test_tlf_shape_errors() {
        let ctx = SocialServiceRegistry::default();
        for path in [
            "/keybase/private",
            "/keybase/private/alice/extra",
            "keybase/private/alice",
            "x/keybase/private/alice",
            "/kbfs/private/alice",
            "/keybase/team/alice",
        ] {
            assert_matches!(
                parse_tlf_path(&ctx, path),
                Err(AssertionError::InvalidTlfPath { .. }),
                "{path}"
            );
        }
    }

    #[test]
    fn test_tlf_display_name_errors_pass_through() {
        let ctx = SocialServiceRegistry::default();
        assert_matches!(
            parse_tlf_path(&ctx, "/keybase/private/a1#b1#c1"),
            Err(AssertionError::TooManySeparators)
        );
    }

    #[test]
    fn test_team_kbfs_path() {
        let name = parse_team_kbfs_path("/keybase/team/Acme.Eng").unwrap();
        assert_eq!(name.to_string(), "acme.eng");

        assert_matches!(
            parse_team_kbfs_path("/keybase/private/acme"),
            Err(AssertionError::InvalidTlfPath { .. })
        );
        assert_matches!(
            parse_team_kbfs_path("/keybase/team"),
            Err(AssertionError::InvalidTlfPath { .. })
        );
        assert_matches!(
            parse_team_kbfs_path("/keybase/team/acme..eng"),
            Err(AssertionError::InvalidTeamName { .. })
        );
    }
}
