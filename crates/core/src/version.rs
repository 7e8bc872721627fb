//! Semantic-version resolution for firmware releases.
//!
//! Pure logic, no database access. The caller fetches the firmware
//! catalog and passes it in; this module only decides which release is
//! the latest one for a hardware revision.

use std::cmp::Ordering;

use semver::Version;

/// A firmware release as seen by the resolver.
///
/// Implemented by the `firmware` entity in `fota-db`; kept as a trait so
/// the resolver stays free of persistence types.
pub trait Release {
    /// The semantic-version string of the release (e.g. `"2.1.0"`).
    fn fw_version(&self) -> &str;
    /// The hardware revision tag the release is compatible with.
    fn hw_compatibility(&self) -> &str;
}

/// Select the latest release compatible with `hw_rev`.
///
/// Filters `releases` to those whose hardware revision matches `hw_rev`
/// case-insensitively (Unicode-aware, so non-ASCII revision tags fold
/// too), then picks the one with the greatest version under semver
/// precedence (so `1.0.0-beta` loses to `1.0.0`, and build metadata
/// never influences the result).
///
/// Returns `None` when `hw_rev` is absent or empty, or when nothing in
/// the catalog matches. Version strings that fail to parse as semver
/// are tolerated and sort below every parsable version; the catalog's
/// unique (version, hardware revision) constraint is assumed, so ties
/// between parsable versions cannot occur.
pub fn resolve_latest<'a, T: Release>(releases: &'a [T], hw_rev: Option<&str>) -> Option<&'a T> {
    let hw_rev = hw_rev.filter(|rev| !rev.is_empty())?.to_lowercase();

    releases
        .iter()
        .filter(|r| r.hw_compatibility().to_lowercase() == hw_rev)
        .max_by(|a, b| compare_versions(a.fw_version(), b.fw_version()))
}

/// Compare two version strings under semver precedence.
///
/// Unparsable strings order below every parsable version and equal to
/// each other.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(a), Ok(b)) => a.cmp_precedence(&b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRelease {
        fw_version: &'static str,
        hw_compatibility: &'static str,
    }

    impl Release for TestRelease {
        fn fw_version(&self) -> &str {
            self.fw_version
        }
        fn hw_compatibility(&self) -> &str {
            self.hw_compatibility
        }
    }

    fn release(fw_version: &'static str, hw_compatibility: &'static str) -> TestRelease {
        TestRelease {
            fw_version,
            hw_compatibility,
        }
    }

    #[test]
    fn picks_greatest_version_for_matching_hardware() {
        let catalog = vec![
            release("1.1.0", "v5"),
            release("2.1.0", "v5"),
            release("3.1.0", "v5"),
            release("3.1.0", "v10"),
            release("9.0.0", "v4"),
        ];

        let latest = resolve_latest(&catalog, Some("v5")).expect("v5 has releases");
        assert_eq!(latest.fw_version(), "3.1.0");
        assert_eq!(latest.hw_compatibility(), "v5");
    }

    #[test]
    fn hardware_revision_match_is_case_insensitive() {
        let catalog = vec![release("1.0.0", "V5"), release("2.0.0", "v5")];

        let latest = resolve_latest(&catalog, Some("V5")).expect("case-folded match");
        assert_eq!(latest.fw_version(), "2.0.0");
    }

    #[test]
    fn hardware_revision_match_folds_non_ascii_case() {
        let catalog = vec![release("1.0.0", "RevÅ"), release("2.0.0", "revå")];

        let latest = resolve_latest(&catalog, Some("REVÅ")).expect("folded match");
        assert_eq!(latest.fw_version(), "2.0.0");
    }

    #[test]
    fn none_or_empty_hardware_revision_yields_none() {
        let catalog = vec![release("1.0.0", "v5")];

        assert!(resolve_latest(&catalog, None).is_none());
        assert!(resolve_latest(&catalog, Some("")).is_none());
    }

    #[test]
    fn unknown_hardware_revision_yields_none() {
        let catalog = vec![release("1.0.0", "v5"), release("2.0.0", "v10")];

        assert!(resolve_latest(&catalog, Some("v20")).is_none());
    }

    #[test]
    fn empty_catalog_yields_none() {
        let catalog: Vec<TestRelease> = Vec::new();

        assert!(resolve_latest(&catalog, Some("v5")).is_none());
    }

    #[test]
    fn prerelease_orders_before_its_release() {
        let catalog = vec![release("1.0.0-beta", "v5"), release("1.0.0", "v5")];

        let latest = resolve_latest(&catalog, Some("v5")).expect("match");
        assert_eq!(latest.fw_version(), "1.0.0");
    }

    #[test]
    fn prerelease_wins_when_it_is_the_highest_version() {
        let catalog = vec![release("1.0.0", "v5"), release("1.1.0-rc.1", "v5")];

        let latest = resolve_latest(&catalog, Some("v5")).expect("match");
        assert_eq!(latest.fw_version(), "1.1.0-rc.1");
    }

    #[test]
    fn build_metadata_does_not_affect_precedence() {
        // 2.0.0+build.99 and 2.0.0 have equal precedence; either result
        // is acceptable, but both must beat 1.9.0.
        let catalog = vec![release("1.9.0", "v5"), release("2.0.0+build.99", "v5")];

        let latest = resolve_latest(&catalog, Some("v5")).expect("match");
        assert_eq!(latest.fw_version(), "2.0.0+build.99");
    }

    #[test]
    fn unparsable_version_sorts_below_any_parsable_version() {
        let catalog = vec![
            release("not-a-version", "v5"),
            release("0.0.1", "v5"),
            release("garbage.build", "v5"),
        ];

        let latest = resolve_latest(&catalog, Some("v5")).expect("match");
        assert_eq!(latest.fw_version(), "0.0.1");
    }

    #[test]
    fn all_unparsable_versions_still_resolve_to_something() {
        let catalog = vec![release("beta-x", "v5"), release("beta-y", "v5")];

        // Implementation-defined which one wins; it must not panic and
        // must return a v5 release.
        let latest = resolve_latest(&catalog, Some("v5")).expect("match");
        assert_eq!(latest.hw_compatibility(), "v5");
    }
}
