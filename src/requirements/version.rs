//! Dotted release version parsing and comparison.
//!
//! Versions are compared segment by segment as numbers, so `1.10` sorts
//! after `1.9`. Missing trailing segments count as zero (`7.4 == 7.4.0`).
//! A recognised pre-release tag (`dev`, `alpha`/`a`, `beta`/`b`, `rc`)
//! sorts below the plain release; any other suffix is treated as build
//! metadata and ignored.

use std::cmp::Ordering;
use std::fmt;

/// Maturity of a version, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
    Release,
}

/// A parsed, comparable version.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<u64>,
    stage: Stage,
    stage_number: u64,
}

impl Version {
    /// Parse a version string.
    ///
    /// Returns `None` unless the string (after trimming and an optional
    /// leading `v`) starts with a dot-separated run of numbers.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let core_len = body
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(body.len());
        let (mut core, suffix) = body.split_at(core_len);
        if !suffix.is_empty() {
            // "1.2.rc1" keeps the dot with the core
            core = core.strip_suffix('.').unwrap_or(core);
        }
        if core.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        for part in core.split('.') {
            segments.push(part.parse::<u64>().ok()?);
        }

        let (stage, stage_number) = parse_stage(suffix);

        Some(Self {
            raw: trimmed.to_string(),
            segments,
            stage,
            stage_number,
        })
    }

    /// Numeric release segments.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Pre-release stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Original (trimmed) text this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_stage(suffix: &str) -> (Stage, u64) {
    if suffix.is_empty() || suffix.starts_with('+') {
        return (Stage::Release, 0);
    }

    let tag = suffix
        .trim_start_matches(['-', '_', '.'])
        .to_ascii_lowercase();
    let word_len = tag
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tag.len());
    let (word, rest) = tag.split_at(word_len);

    let stage = match word {
        "dev" => Stage::Dev,
        "alpha" | "a" => Stage::Alpha,
        "beta" | "b" => Stage::Beta,
        "rc" => Stage::ReleaseCandidate,
        _ => return (Stage::Release, 0),
    };

    let digits: String = rest
        .trim_start_matches(['.', '-', '_'])
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    (stage, digits.parse().unwrap_or(0))
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }

        self.stage
            .cmp(&other.stage)
            .then(self.stage_number.cmp(&other.stage_number))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Whether `input` is a well-formed comparable version string.
pub fn is_comparable(input: &str) -> bool {
    Version::parse(input).is_some()
}

/// Whether `current` satisfies `minimum` (`current >= minimum`).
///
/// Returns `false` when either side fails to parse.
pub fn meets_minimum(current: &str, minimum: &str) -> bool {
    match (Version::parse(current), Version::parse(minimum)) {
        (Some(current), Some(minimum)) => current >= minimum,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_compare_numerically() {
        assert!(meets_minimum("2.0", "1.9"));
        assert!(!meets_minimum("1.9", "1.10"));
        assert!(meets_minimum("1.10", "1.9"));
    }

    #[test]
    fn equal_versions_meet_minimum() {
        assert!(meets_minimum("7.4", "7.4"));
        assert!(meets_minimum("6.4.2", "6.4.2"));
    }

    #[test]
    fn missing_segments_count_as_zero() {
        assert!(meets_minimum("7.4", "7.4.0"));
        assert!(meets_minimum("7.4.0", "7.4"));
        assert!(!meets_minimum("7.4", "7.4.1"));
    }

    #[test]
    fn leading_v_is_accepted() {
        assert!(meets_minimum("v18.17.0", "18"));
        assert_eq!(Version::parse("v1.2").unwrap().segments(), &[1, 2]);
    }

    #[test]
    fn prerelease_sorts_below_release() {
        assert!(!meets_minimum("6.4-RC1", "6.4"));
        assert!(meets_minimum("6.4", "6.4-rc2"));
        assert!(meets_minimum("6.4-beta2", "6.4-beta1"));
        assert!(meets_minimum("6.4-rc1", "6.4-beta3"));
        assert!(!meets_minimum("8.3.0-dev", "8.3.0alpha1"));
    }

    #[test]
    fn unknown_suffix_is_build_metadata() {
        let v = Version::parse("8.1.2-1ubuntu4").unwrap();
        assert_eq!(v.stage(), Stage::Release);
        assert!(meets_minimum("8.1.2-1ubuntu4", "8.1.2"));
        assert!(meets_minimum("1.0.0+build.5", "1.0"));
    }

    #[test]
    fn dotted_prerelease_tag_keeps_core() {
        let v = Version::parse("1.2.rc1").unwrap();
        assert_eq!(v.segments(), &[1, 2]);
        assert_eq!(v.stage(), Stage::ReleaseCandidate);
    }

    #[test]
    fn malformed_versions_are_not_comparable() {
        assert!(!is_comparable(""));
        assert!(!is_comparable("   "));
        assert!(!is_comparable("latest"));
        assert!(!is_comparable(".5"));
        assert!(!is_comparable("1..2"));
        assert!(!is_comparable("99999999999999999999999"));
    }

    #[test]
    fn malformed_current_never_meets() {
        assert!(!meets_minimum("", "1.0"));
        assert!(!meets_minimum("abc", "0"));
    }

    #[test]
    fn malformed_minimum_never_meets() {
        assert!(!meets_minimum("1.0", ""));
        assert!(!meets_minimum("1.0", "one"));
    }

    #[test]
    fn display_shows_trimmed_input() {
        let v = Version::parse("  3.0.1 ").unwrap();
        assert_eq!(v.to_string(), "3.0.1");
        assert_eq!(v.as_str(), "3.0.1");
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(Version::parse("2").unwrap(), Version::parse("2.0.0").unwrap());
    }
}
