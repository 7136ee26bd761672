//! Human-readable rendering of issue lists

use indexmap::IndexMap;
use shared_types::{Issue, Target};

/// Shown when a check ran and found nothing
pub const NO_ISSUES: &str = "No issues";

/// Group versions by brand name in first-seen order: `Firefox (90, 91) Chrome (92)`
pub fn render_browser_list(targets: &[Target]) -> String {
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();

    for target in targets {
        groups
            .entry(target.brand_name.as_str())
            .or_default()
            .push(target.version.as_str());
    }

    groups
        .iter()
        .map(|(name, versions)| format!("{} ({})", name, versions.join(", ")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line for the property and one for the value, each only when unsupported somewhere
pub fn render_issue(issue: &Issue) -> Vec<String> {
    let mut lines = Vec::new();

    if !issue.property_issues.is_empty() {
        lines.push(format!(
            "{} property is not supported in {}.",
            issue.property,
            render_browser_list(&issue.property_issues)
        ));
    }

    if let Some(value) = &issue.value {
        if !issue.value_issues.is_empty() {
            lines.push(format!(
                "{}:{} value is not supported in {}.",
                issue.property,
                value,
                render_browser_list(&issue.value_issues)
            ));
        }
    }

    lines
}

/// `None` until a check has run
pub fn render_issue_list(issues: Option<&[Issue]>) -> Option<String> {
    let issues = issues?;
    if issues.is_empty() {
        return Some(NO_ISSUES.to_string());
    }

    Some(
        issues
            .iter()
            .flat_map(render_issue)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ReleaseStatus;

    fn target(brand: &str, version: &str) -> Target {
        Target {
            browser: brand.to_lowercase(),
            brand_name: brand.to_string(),
            version: version.to_string(),
            status: ReleaseStatus::Current,
        }
    }

    #[test]
    fn test_groups_versions_by_brand() {
        let targets = vec![
            target("Firefox", "90"),
            target("Chrome", "92"),
            target("Firefox", "91"),
        ];
        assert_eq!(render_browser_list(&targets), "Firefox (90, 91) Chrome (92)");
    }

    #[test]
    fn test_renders_property_and_value_lines() {
        let issue = Issue {
            property: "display".to_string(),
            property_issues: vec![target("Safari", "14")],
            value: Some("contents".to_string()),
            value_issues: vec![target("Firefox", "90"), target("Firefox", "91")],
        };

        assert_eq!(
            render_issue(&issue),
            vec![
                "display property is not supported in Safari (14).".to_string(),
                "display:contents value is not supported in Firefox (90, 91).".to_string(),
            ]
        );
    }

    #[test]
    fn test_value_without_issues_is_not_rendered() {
        let issue = Issue {
            property: "gap".to_string(),
            property_issues: vec![target("Safari", "14")],
            value: Some("normal".to_string()),
            value_issues: Vec::new(),
        };
        assert_eq!(render_issue(&issue).len(), 1);
    }

    #[test]
    fn test_issue_list_states() {
        assert_eq!(render_issue_list(None), None);
        assert_eq!(render_issue_list(Some(&[][..])), Some(NO_ISSUES.to_string()));
    }
}
