//! Browser version parsing and support-range comparison
//!
//! Dataset versions are strings such as `"88"`, `"10.1"` or `"≤37"`, or the
//! JSON literals `true`/`false`/`null`. They are normalised into [`Bound`]s
//! so a support interval can be tested against a target version.

use std::cmp::Ordering;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Leading dotted number, optionally preceded by a range marker
    static ref VERSION_RE: Regex = Regex::new(r"^\s*(?:≤|<=)?\s*(\d+(?:\.\d+)*)").unwrap();
}

/// Raw `version_added` / `version_removed` value from the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Text(String),
}

/// Dotted numeric version; missing trailing components compare as zero
#[derive(Debug, Clone)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn parse(text: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(text)?;
        let components = caps
            .get(1)?
            .as_str()
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        Some(Version(components))
    }

    pub fn zero() -> Self {
        Version(vec![0])
    }

    fn component(&self, idx: usize) -> u64 {
        self.0.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|idx| self.component(idx).cmp(&other.component(idx)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
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
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// One end of a support interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// Supported since the first release
    Zero,
    At(Version),
    /// Still supported
    Infinity,
    /// No version qualifies
    Never,
}

/// `version_added`: `true` is version zero, anything unknown never matches
pub fn added_bound(value: Option<&VersionValue>) -> Bound {
    match value {
        Some(VersionValue::Flag(true)) => Bound::Zero,
        Some(VersionValue::Text(text)) => Version::parse(text).map_or(Bound::Never, Bound::At),
        Some(VersionValue::Flag(false)) | None => Bound::Never,
    }
}

/// `version_removed`: absent or `false` means still supported
pub fn removed_bound(value: Option<&VersionValue>) -> Bound {
    match value {
        Some(VersionValue::Flag(false)) | None => Bound::Infinity,
        Some(VersionValue::Text(text)) => Version::parse(text).map_or(Bound::Zero, Bound::At),
        // Removed at an unknown version
        Some(VersionValue::Flag(true)) => Bound::Zero,
    }
}

/// Half-open interval `[added, removed)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportRange {
    pub added: Bound,
    pub removed: Bound,
}

impl SupportRange {
    pub fn new(added: Option<&VersionValue>, removed: Option<&VersionValue>) -> Self {
        Self {
            added: added_bound(added),
            removed: removed_bound(removed),
        }
    }

    pub fn contains(&self, version: &Version) -> bool {
        let after_added = match &self.added {
            Bound::Zero => true,
            Bound::At(added) => added <= version,
            Bound::Infinity | Bound::Never => false,
        };
        let before_removed = match &self.removed {
            Bound::Infinity => true,
            Bound::At(removed) => version < removed,
            Bound::Zero | Bound::Never => false,
        };
        after_added && before_removed
    }
}
