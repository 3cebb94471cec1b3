//! Version normalization, parsing, and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, VersionError};

static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<major>\d+)\.(?<minor>\d+)(?:\.(?<patch>\d+))?(?:-?(?<pre>(?:rc|beta|alpha)\d+))?$")
        .unwrap()
});

/// A version split into its numeric core and prerelease tag.
///
/// The default value is the "zero parse" returned by [`parse`] for strings
/// that do not match the version grammar. It is not a real `0.0.0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    pub major:      u64,
    pub minor:      u64,
    pub patch:      u64,
    /// Prerelease tag without separator, e.g. `rc2`. Empty for stable.
    pub prerelease: String,
}

impl ParsedVersion {
    pub fn is_stable(&self) -> bool { self.prerelease.is_empty() }

    /// Precedence order: numbers first, then prerelease family and number.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| compare_prerelease(&self.prerelease, &other.prerelease))
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for ParsedVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self> { try_parse(s) }
}

/// Strip one leading `go` and then one leading `v`.
pub fn normalize(v: &str) -> &str {
    let v = v.strip_prefix("go").unwrap_or(v);
    v.strip_prefix('v').unwrap_or(v)
}

/// Parse a version, returning the zero parse when it does not match.
pub fn parse(v: &str) -> ParsedVersion { try_parse(v).unwrap_or_default() }

/// Parse a version, failing when it does not match.
pub fn try_parse(v: &str) -> Result<ParsedVersion> {
    let caps = VERSION_REGEX
        .captures(normalize(v))
        .ok_or_else(|| VersionError::Invalid(v.to_string()))?;

    let number = |name: &str| -> Result<u64> {
        caps.name(name)
            .map(|m| m.as_str().parse::<u64>())
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(|_| VersionError::Invalid(v.to_string()))
    };

    Ok(ParsedVersion {
        major:      number("major")?,
        minor:      number("minor")?,
        patch:      number("patch")?,
        prerelease: caps
            .name("pre")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

/// Whether `v` names a version of at least `major.minor` form.
pub fn is_valid_version(v: &str) -> bool { VERSION_REGEX.is_match(normalize(v)) }

/// Total order over version strings.
///
/// Malformed strings all parse to zero, so they compare equal to each other
/// and below any well-formed version with a nonzero component.
pub fn compare(v1: &str, v2: &str) -> Ordering {
    if v1 == v2 {
        return Ordering::Equal;
    }
    let (n1, n2) = (normalize(v1), normalize(v2));
    if n1 == n2 {
        return Ordering::Equal;
    }
    parse(n1).cmp_precedence(&parse(n2))
}

/// Family rank of a prerelease tag: alpha 1, beta 2, rc 3, anything else 0.
pub fn prerelease_rank(tag: &str) -> u8 {
    if tag.starts_with("alpha") {
        1
    } else if tag.starts_with("beta") {
        2
    } else if tag.starts_with("rc") {
        3
    } else {
        0
    }
}

fn prerelease_number(tag: &str) -> u64 {
    let digits = tag.len() - tag.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    tag[tag.len() - digits..].parse().unwrap_or(0)
}

/// Compare two prerelease tags. A stable (empty) tag outranks any prerelease.
pub fn compare_prerelease(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => prerelease_rank(a)
            .cmp(&prerelease_rank(b))
            .then_with(|| prerelease_number(a).cmp(&prerelease_number(b))),
    }
}
