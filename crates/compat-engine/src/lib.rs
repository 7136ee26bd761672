//! CSS compatibility checking against browser-compat-data
//!
//! Given the computed style layout of an element and a set of target browser
//! releases, reports which properties and values those releases do not
//! support.

pub mod dataset;
pub mod detector;
pub mod error;
pub mod inspector;
pub mod report;
pub mod targets;
pub mod version;

pub use dataset::{CompatDataset, FeatureNode, FeatureTree};
pub use detector::{find_compatibility_issues, get_unsupported_browsers};
pub use error::CompatError;
pub use inspector::{CompatibilityPanel, InspectorEvent, LayoutSource, NodeRef, Selection};
pub use targets::{get_target_browsers, TargetConfig, DEFAULT_BROWSERS};

use shared_types::{CompatReport, IssueList, ReleaseStatus, StyleLayout, Target};

/// CompatEngine entry point: a loaded dataset plus the targets derived from it
#[derive(Debug)]
pub struct CompatEngine {
    dataset: CompatDataset,
    config: TargetConfig,
    targets: Vec<Target>,
}

impl CompatEngine {
    /// Engine checking the default browsers on current, beta and nightly channels
    pub fn new(dataset: CompatDataset) -> Self {
        Self::with_config(dataset, TargetConfig::default())
    }

    pub fn with_config(dataset: CompatDataset, config: TargetConfig) -> Self {
        let targets = get_target_browsers(&dataset, &config);
        Self {
            dataset,
            config,
            targets,
        }
    }

    pub fn with_browsers<I, S>(self, browsers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = self.config.clone().with_browsers(browsers);
        Self::with_config(self.dataset, config)
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = ReleaseStatus>) -> Self {
        let config = self.config.clone().with_statuses(statuses);
        Self::with_config(self.dataset, config)
    }

    pub fn dataset(&self) -> &CompatDataset {
        &self.dataset
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn check_layout(&self, layout: &StyleLayout) -> IssueList {
        find_compatibility_issues(layout, self.dataset.css_properties(), &self.targets)
    }

    /// Check a layout given as a JSON object of property -> value
    pub fn check_layout_json(&self, layout_json: &str) -> Result<IssueList, CompatError> {
        let layout: StyleLayout =
            serde_json::from_str(layout_json).map_err(CompatError::LayoutParse)?;
        Ok(self.check_layout(&layout))
    }

    pub fn check_report(&self, layout: &StyleLayout) -> CompatReport {
        CompatReport {
            issues: self.check_layout(layout),
            target_count: self.targets.len(),
            checked_at: chrono::Utc::now().timestamp() as u64,
        }
    }
}
