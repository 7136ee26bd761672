//! Target browser selection
//!
//! Targets are the releases of the checked browsers whose channel is still
//! relevant (by default current, beta and nightly).

use serde::{Deserialize, Serialize};
use shared_types::{ReleaseStatus, Target};

use crate::dataset::CompatDataset;

/// Browsers checked when no explicit list is configured, in report order
pub const DEFAULT_BROWSERS: &[&str] = &[
    "firefox",
    "firefox_android",
    "chrome",
    "chrome_android",
    "safari",
    "safari_ios",
    "edge",
    "edge_mobile",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,
    #[serde(default = "default_statuses")]
    pub statuses: Vec<ReleaseStatus>,
}

fn default_browsers() -> Vec<String> {
    DEFAULT_BROWSERS.iter().map(|b| b.to_string()).collect()
}

fn default_statuses() -> Vec<ReleaseStatus> {
    ReleaseStatus::DEFAULT_TARGETS.to_vec()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            browsers: default_browsers(),
            statuses: default_statuses(),
        }
    }
}

impl TargetConfig {
    pub fn with_browsers<I, S>(mut self, browsers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.browsers = browsers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ReleaseStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }
}

/// Collect target releases in browser-list order, then dataset release order
pub fn get_target_browsers(dataset: &CompatDataset, config: &TargetConfig) -> Vec<Target> {
    let mut targets = Vec::new();

    for id in &config.browsers {
        let Some(browser) = dataset.browser(id) else {
            tracing::warn!(browser = %id, "Browser missing from compatibility dataset, skipping");
            continue;
        };

        for (version, release) in &browser.releases {
            if !config.statuses.contains(&release.status) {
                continue;
            }

            targets.push(Target {
                browser: id.clone(),
                brand_name: browser.name.clone(),
                version: version.clone(),
                status: release.status,
            });
        }
    }

    tracing::debug!(count = targets.len(), "Selected target browsers");
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> CompatDataset {
        CompatDataset::from_json_str(
            r#"{
            "browsers": {
                "chrome": {"name": "Chrome", "releases": {
                    "91": {"status": "retired"},
                    "92": {"status": "current"},
                    "93": {"status": "beta"},
                    "94": {"status": "nightly"},
                    "95": {"status": "planned"}
                }},
                "firefox": {"name": "Firefox", "releases": {
                    "78": {"status": "esr"},
                    "90": {"status": "current"},
                    "91": {"status": "beta"}
                }}
            }
        }"#,
        )
        .unwrap()
    }

    fn versions(targets: &[Target]) -> Vec<(&str, &str)> {
        targets
            .iter()
            .map(|t| (t.browser.as_str(), t.version.as_str()))
            .collect()
    }

    #[test]
    fn test_filters_to_current_beta_nightly() {
        let targets = get_target_browsers(&dataset(), &TargetConfig::default());

        assert_eq!(
            versions(&targets),
            vec![
                ("firefox", "90"),
                ("firefox", "91"),
                ("chrome", "92"),
                ("chrome", "93"),
                ("chrome", "94"),
            ]
        );
        assert_eq!(targets[2].brand_name, "Chrome");
        assert_eq!(targets[4].status, ReleaseStatus::Nightly);
    }

    #[test]
    fn test_missing_browsers_are_skipped() {
        let config = TargetConfig::default().with_browsers(["safari", "chrome"]);
        let targets = get_target_browsers(&dataset(), &config);
        assert!(targets.iter().all(|t| t.browser == "chrome"));
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn test_custom_statuses() {
        let config = TargetConfig::default()
            .with_browsers(["firefox"])
            .with_statuses([ReleaseStatus::Esr]);
        let targets = get_target_browsers(&dataset(), &config);
        assert_eq!(versions(&targets), vec![("firefox", "78")]);
    }

    #[test]
    fn test_config_defaults_when_deserialized_empty() {
        let config: TargetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TargetConfig::default());
        assert_eq!(config.browsers.len(), 8);
    }
}
