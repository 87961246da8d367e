//! Build identifiers as produced by `git describe --tags`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static BUILD_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-([1-9][0-9]*)-([a-z0-9]+))?$")
        .expect("static regex must compile")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildIdError {
    #[error("invalid build id {0:?}: expected vMAJOR.MINOR.PATCH[-COMMITS-REVISION]")]
    InvalidFormat(String),
    #[error("invalid build id {0:?}: number out of range")]
    OutOfRange(String),
}

/// Commits made after the last release tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    /// Number of commits since the tag, at least 1.
    pub commits: u64,
    /// Abbreviated revision of the last commit.
    pub revision: String,
}

/// A version such as `v1.2.3`, or `v1.2.3-4-gabc123` for a build made four
/// commits after the `v1.2.3` tag.
///
/// # Examples
///
/// ```
/// use program_core::BuildId;
///
/// let release: BuildId = "v1.2.3".parse().unwrap();
/// let snapshot: BuildId = "v1.2.3-4-gabc123".parse().unwrap();
///
/// assert!(release.is_stable());
/// assert!(!snapshot.is_stable());
/// assert!(release.lower_than_or_equal_to(&snapshot));
/// assert_eq!(snapshot.to_string(), "v1.2.3-4-gabc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BuildId {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub snapshot: Option<Snapshot>,
}

impl BuildId {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            snapshot: None,
        }
    }

    /// Returns true for a tagged release, i.e. no commits after the tag.
    pub fn is_stable(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Compares version numbers, then commit counts with a release counting
    /// as zero commits. Revisions are not compared.
    pub fn lower_than_or_equal_to(&self, other: &BuildId) -> bool {
        let key = |id: &BuildId| {
            (
                id.major,
                id.minor,
                id.patch,
                id.snapshot.as_ref().map_or(0, |snapshot| snapshot.commits),
            )
        };

        key(self) <= key(other)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(snapshot) = &self.snapshot {
            write!(f, "-{}-{}", snapshot.commits, snapshot.revision)?;
        }
        Ok(())
    }
}

impl FromStr for BuildId {
    type Err = BuildIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = BUILD_ID_RE
            .captures(s)
            .ok_or_else(|| BuildIdError::InvalidFormat(s.to_string()))?;

        let number = |index: usize| -> Result<u64, BuildIdError> {
            captures[index]
                .parse()
                .map_err(|_| BuildIdError::OutOfRange(s.to_string()))
        };

        let snapshot = match (captures.get(4), captures.get(5)) {
            (Some(_), Some(revision)) => Some(Snapshot {
                commits: number(4)?,
                revision: revision.as_str().to_string(),
            }),
            _ => None,
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            snapshot,
        })
    }
}

impl TryFrom<String> for BuildId {
    type Error = BuildIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BuildId> for String {
    fn from(id: BuildId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> BuildId {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(id("v0.0.0"), BuildId::new(0, 0, 0));
        assert_eq!(id("v1.20.300"), BuildId::new(1, 20, 300));

        let snapshot = id("v1.2.3-42-g1a2b3c");
        assert_eq!((snapshot.major, snapshot.minor, snapshot.patch), (1, 2, 3));
        assert_eq!(
            snapshot.snapshot,
            Some(Snapshot {
                commits: 42,
                revision: "g1a2b3c".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_invalid() {
        for s in [
            "",
            "1.2.3",
            "v1.2",
            "v01.2.3",
            "v1.2.3-0-abc",
            "v1.2.3-4",
            "v1.2.3-4-ABC",
            "v1x2x3",
            " v1.2.3",
        ] {
            assert_eq!(
                s.parse::<BuildId>(),
                Err(BuildIdError::InvalidFormat(s.to_string())),
                "{s:?}"
            );
        }

        assert_eq!(
            "v99999999999999999999.0.0".parse::<BuildId>(),
            Err(BuildIdError::OutOfRange("v99999999999999999999.0.0".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for s in ["v0.1.0", "v2.0.11-3-deadbeef"] {
            assert_eq!(id(s).to_string(), s);
        }
    }

    #[test]
    fn test_lower_than_or_equal_to() {
        assert!(id("v1.2.3").lower_than_or_equal_to(&id("v1.2.3")));
        assert!(id("v1.2.3").lower_than_or_equal_to(&id("v1.2.4")));
        assert!(id("v1.2.9").lower_than_or_equal_to(&id("v1.3.0")));
        assert!(id("v1.9.9").lower_than_or_equal_to(&id("v2.0.0")));
        assert!(!id("v2.0.0").lower_than_or_equal_to(&id("v1.9.9")));

        assert!(id("v1.2.3").lower_than_or_equal_to(&id("v1.2.3-1-a")));
        assert!(!id("v1.2.3-1-a").lower_than_or_equal_to(&id("v1.2.3")));
        assert!(id("v1.2.3-2-a").lower_than_or_equal_to(&id("v1.2.3-2-b")));
        assert!(!id("v1.2.3-3-a").lower_than_or_equal_to(&id("v1.2.3-2-a")));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let snapshot = id("v1.2.3-4-abc");
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, "\"v1.2.3-4-abc\"");

        let back: BuildId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);

        assert!(serde_json::from_str::<BuildId>("\"1.2.3\"").is_err());
    }
}
