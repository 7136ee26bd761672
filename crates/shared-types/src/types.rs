/// Release channel of a browser version, as recorded in the compat dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Retired,
    Current,
    Exclusive,
    Beta,
    Nightly,
    Esr,
    Planned,
    #[serde(other)]
    Unknown,
}

impl ReleaseStatus {
    /// Channels checked when no explicit status filter is configured
    pub const DEFAULT_TARGETS: &'static [ReleaseStatus] = &[
        ReleaseStatus::Current,
        ReleaseStatus::Beta,
        ReleaseStatus::Nightly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Retired => "retired",
            ReleaseStatus::Current => "current",
            ReleaseStatus::Exclusive => "exclusive",
            ReleaseStatus::Beta => "beta",
            ReleaseStatus::Nightly => "nightly",
            ReleaseStatus::Esr => "esr",
            ReleaseStatus::Planned => "planned",
            ReleaseStatus::Unknown => "unknown",
        }
    }

    /// Parse a status name (e.g., "beta") using the dataset's channel names
    pub fn parse(name: &str) -> Self {
        let name = serde_json::Value::String(name.trim().to_lowercase());
        serde_json::from_value(name).unwrap_or(ReleaseStatus::Unknown)
    }
}

/// A browser release selected for compatibility checking
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Target {
    pub browser: String,    // Dataset id, e.g., "firefox_android"
    pub brand_name: String, // Display name, e.g., "Firefox for Android"
    pub version: String,
    pub status: ReleaseStatus,
}

/// Unsupported targets for one declaration of the inspected element
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Issue {
    pub property: String,
    pub property_issues: Vec<Target>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_issues: Vec<Target>,
}

impl Issue {
    pub fn has_issues(&self) -> bool {
        !self.property_issues.is_empty() || !self.value_issues.is_empty()
    }
}

pub type IssueList = Vec<Issue>;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompatReport {
    pub issues: IssueList,
    pub target_count: usize,
    pub checked_at: u64,
}
