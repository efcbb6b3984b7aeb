use crate::error::{GitmojiError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation.
///
/// Ordering is lexicographic on `(major, minor, patch)`, which the derive
/// provides through field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version from a tag name (e.g., "v1.2.3" or "V1.2.3" -> SemVer(1,2,3)).
    ///
    /// Returns `None` for anything that is not a plain release version:
    /// pre-release and build suffixes do not count as version tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let clean = tag
            .strip_prefix('v')
            .or_else(|| tag.strip_prefix('V'))
            .unwrap_or(tag);

        let parsed = semver::Version::parse(clean).ok()?;
        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return None;
        }

        Some(SemVer::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to bump type, zeroing every lower component.
    ///
    /// Fails with [`GitmojiError::VersionOverflow`] when the bumped component
    /// is already `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || GitmojiError::VersionOverflow {
            version: self.to_string(),
            bump: bump_type.to_string(),
        };
        let next = |component: u64| component.checked_add(1).ok_or_else(overflow);
        Ok(match bump_type {
            VersionBump::Major => SemVer::new(next(self.major)?, 0, 0),
            VersionBump::Minor => SemVer::new(self.major, next(self.minor)?, 0),
            VersionBump::Patch => SemVer::new(self.major, self.minor, next(self.patch)?),
        })
    }

    /// Tag name for this version ("v1.2.3")
    pub fn tag_name(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version bump kind requested for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionBump {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl FromStr for VersionBump {
    type Err = GitmojiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(VersionBump::Major),
            "minor" => Ok(VersionBump::Minor),
            "patch" => Ok(VersionBump::Patch),
            other => Err(GitmojiError::InvalidBump(other.to_string())),
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(SemVer::from_tag("v1.2.3"), Some(SemVer::new(1, 2, 3)));
        assert_eq!(SemVer::from_tag("V2.0.0"), Some(SemVer::new(2, 0, 0)));
        assert_eq!(SemVer::from_tag("0.1.0"), Some(SemVer::new(0, 1, 0)));
    }

    #[test]
    fn test_from_tag_rejects_non_versions() {
        assert_eq!(SemVer::from_tag("not-semver"), None);
        assert_eq!(SemVer::from_tag("v1"), None);
        assert_eq!(SemVer::from_tag("v1.2"), None);
        assert_eq!(SemVer::from_tag("v1.2.3.4"), None);
        assert_eq!(SemVer::from_tag("v1.2.3-rc.1"), None);
        assert_eq!(SemVer::from_tag("vv1.2.3"), None);
    }

    #[test]
    fn test_bump() {
        let v = SemVer::new(1, 2, 3);
        assert_eq!(v.bump(VersionBump::Patch).unwrap(), SemVer::new(1, 2, 4));
        assert_eq!(v.bump(VersionBump::Minor).unwrap(), SemVer::new(1, 3, 0));
        assert_eq!(v.bump(VersionBump::Major).unwrap(), SemVer::new(2, 0, 0));
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let v = SemVer::from_tag("v1.2.18446744073709551615").unwrap();
        let err = v.bump(VersionBump::Patch).unwrap_err();
        assert!(
            matches!(err, GitmojiError::VersionOverflow { ref bump, .. } if bump == "patch"),
            "{}",
            err
        );

        // Only the bumped component matters, lower ones are reset
        assert_eq!(v.bump(VersionBump::Minor).unwrap(), SemVer::new(1, 3, 0));
        assert!(SemVer::new(1, u64::MAX, 0).bump(VersionBump::Minor).is_err());
        assert!(SemVer::new(u64::MAX, 0, 0).bump(VersionBump::Major).is_err());
    }

    #[test]
    fn test_bump_strictly_increases() {
        let samples = [
            SemVer::new(0, 0, 0),
            SemVer::new(1, 2, 3),
            SemVer::new(0, 9, 99),
            SemVer::new(7, 0, 0),
        ];
        for v in samples {
            for kind in [VersionBump::Patch, VersionBump::Minor, VersionBump::Major] {
                assert!(v.bump(kind).unwrap() > v, "{} bumped by {} did not increase", v, kind);
            }
        }
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(SemVer::new(1, 2, 3) > SemVer::new(1, 2, 2));
        assert!(SemVer::new(1, 3, 0) > SemVer::new(1, 2, u64::MAX));
        assert!(SemVer::new(2, 0, 0) > SemVer::new(1, u64::MAX, u64::MAX));
    }

    #[test]
    fn test_tag_name_and_display() {
        let v = SemVer::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
        assert_eq!(v.tag_name(), "v1.2.3");
    }

    #[test]
    fn test_bump_from_str() {
        assert_eq!("minor".parse::<VersionBump>().unwrap(), VersionBump::Minor);
        let err = "huge".parse::<VersionBump>().unwrap_err();
        assert!(matches!(err, GitmojiError::InvalidBump(v) if v == "huge"));
    }
}
