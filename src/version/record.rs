//! Resolved version record and its display formatting

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN_STR;

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

static UNKNOWN: LazyLock<Arc<Version>> = LazyLock::new(|| {
    Arc::new(Version::new(
        UNKNOWN_STR,
        UNKNOWN_STR,
        UNKNOWN_STR,
        UNKNOWN_STR,
    ))
});

/// Build/version identity of a module
///
/// Records handed out by the resolver are shared (`Arc<Version>`); the same
/// instance is returned for every namespace that resolved through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Namespace where the descriptor was found
    group_id: String,
    artifact_id: String,
    project_version: String,
    /// Empty when the descriptor has no build number
    build_number: String,
}

impl Version {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        project_version: impl Into<String>,
        build_number: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            project_version: project_version.into(),
            build_number: build_number.into(),
        }
    }

    /// The shared "no version information" record
    pub fn unknown() -> Arc<Version> {
        Arc::clone(&*UNKNOWN)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    pub fn build_number(&self) -> &str {
        &self.build_number
    }

    /// True for the unknown record, whether the shared instance or an equal copy
    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, Arc::as_ptr(&*UNKNOWN)) || *self == **UNKNOWN
    }

    /// Display tag: decorated project version, plus `-<build>` when a build number exists
    ///
    /// ```
    /// use module_version::Version;
    ///
    /// let v = Version::new("com.bar", "foo", "1.0", "a12f");
    /// assert_eq!(v.tag(), "r1.0-a12f");
    /// ```
    pub fn tag(&self) -> String {
        if self.is_unknown() {
            return UNKNOWN_STR.to_string();
        }

        let decorated = decorated_project_version(&self.project_version);
        if self.build_number.is_empty() {
            decorated
        } else {
            format!("{}-{}", decorated, self.build_number)
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str(UNKNOWN_STR);
        }
        write!(f, "{}-{}", self.artifact_id, self.tag())
    }
}

/// Prefix a project version with `v` for snapshots and `r` for releases
pub fn decorated_project_version(project_version: &str) -> String {
    if project_version.ends_with(SNAPSHOT_SUFFIX) {
        format!("v{}", project_version)
    } else {
        format!("r{}", project_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(version: &Version) -> u64 {
        let mut hasher = DefaultHasher::new();
        version.hash(&mut hasher);
        hasher.finish()
    }

    fn sample() -> Version {
        Version::new("com.bar", "foo", "1.0", "a12f")
    }

    #[rstest]
    #[case("1.0.0-SNAPSHOT", "v1.0.0-SNAPSHOT")]
    #[case("1.0.0", "r1.0.0")]
    #[case("1.0.0-snapshot", "r1.0.0-snapshot")]
    #[case("1.0.0-SNAPSHOT.1", "r1.0.0-SNAPSHOT.1")]
    #[case("", "r")]
    fn decorated_project_version_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decorated_project_version(input), expected);
    }

    #[test]
    fn tag_appends_build_number_when_present() {
        let version = sample();

        assert_eq!(version.tag(), "r1.0-a12f");
        assert_eq!(version.to_string(), "foo-r1.0-a12f");
    }

    #[test]
    fn tag_is_decorated_version_without_build_number() {
        let version = Version::new("org.mrcool.swissknife.db", "bar", "0.8-SNAPSHOT", "");

        assert_eq!(version.tag(), "v0.8-SNAPSHOT");
        assert_eq!(version.to_string(), "bar-v0.8-SNAPSHOT");
    }

    #[test]
    fn unknown_is_unknown() {
        let unknown = Version::unknown();

        assert!(unknown.is_unknown());
        assert_eq!(unknown.tag(), UNKNOWN_STR);
        assert_eq!(unknown.to_string(), UNKNOWN_STR);
        assert!(Arc::ptr_eq(&unknown, &Version::unknown()));
    }

    #[test]
    fn constructed_records_are_not_unknown() {
        assert!(!sample().is_unknown());
        assert!(!Version::new("", "", "", "").is_unknown());
        assert!(!Version::new("org", UNKNOWN_STR, UNKNOWN_STR, "").is_unknown());
    }

    #[test]
    fn equal_to_self() {
        let version = sample();
        assert_eq!(version, version.clone());
    }

    #[test]
    fn records_with_same_parts_are_equal_and_hash_equal() {
        let v1 = sample();
        let v2 = Version::new("com.bar", "foo", "1.0", "a12f");

        assert_eq!(v1, v2);
        assert_eq!(hash_of(&v1), hash_of(&v2));
    }

    #[rstest]
    #[case(Version::new("net.bar", "foo", "1.0", "a12f"))]
    #[case(Version::new("com.bar", "Foo", "1.0", "a12f"))]
    #[case(Version::new("com.bar", "foo", "1.1", "a12f"))]
    #[case(Version::new("com.bar", "foo", "1.0", "a12x"))]
    fn changing_any_part_breaks_equality_and_hash(#[case] other: Version) {
        let version = sample();

        assert_ne!(version, other);
        assert_ne!(hash_of(&version), hash_of(&other));
    }

    #[test]
    fn serde_round_trip_preserves_equality() {
        let version = sample();

        let json = serde_json::to_string(&version).unwrap();
        let restored: Version = serde_json::from_str(&json).unwrap();

        assert!(json.contains(r#""artifactId":"foo""#));
        assert_eq!(restored, version);
    }
}
