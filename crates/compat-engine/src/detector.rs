//! Unsupported-browser detection for CSS properties and values

use shared_types::{Issue, IssueList, StyleLayout, Target};

use crate::dataset::{FeatureNode, FeatureTree};
use crate::version::Version;

/// Suffix of child keys that scope compat data to a usage context
pub const CONTEXT_SUFFIX: &str = "_context";

/// Follow `*_context` children until a node with compat data is reached
///
/// There is no way to know which context applies to the inspected element,
/// so the first context key in dataset order wins.
pub fn resolve_context(node: &FeatureNode) -> &FeatureNode {
    let mut current = node;
    while current.compat().is_none() {
        let next = current
            .children()
            .find(|(key, _)| key.ends_with(CONTEXT_SUFFIX))
            .map(|(_, child)| child);
        match next {
            Some(child) => current = child,
            None => break,
        }
    }
    current
}

/// Whether any unprefixed, unflagged statement covers the target version
pub fn is_supported(node: &FeatureNode, target: &Target) -> bool {
    let Some(compat) = node.compat() else {
        return true;
    };
    let Some(version) = Version::parse(&target.version) else {
        return false;
    };

    compat
        .support_for(&target.browser)
        .iter()
        .filter(|statement| statement.is_unconditional())
        .any(|statement| statement.range().contains(&version))
}

/// Targets lacking support for a feature; empty when the feature has no compat data
pub fn get_unsupported_browsers(node: &FeatureNode, targets: &[Target]) -> Vec<Target> {
    let node = resolve_context(node);
    if node.compat().is_none() {
        return Vec::new();
    }

    targets
        .iter()
        .filter(|target| !is_supported(node, target))
        .cloned()
        .collect()
}

/// Check every declaration of a layout against the target browsers
pub fn find_compatibility_issues(
    layout: &StyleLayout,
    properties: &FeatureTree,
    targets: &[Target],
) -> IssueList {
    let mut issues = Vec::new();

    for (property, value) in layout.properties() {
        let Some(property_node) = properties.get(property) else {
            continue;
        };

        let mut issue = Issue {
            property: property.to_string(),
            property_issues: get_unsupported_browsers(property_node, targets),
            value: None,
            value_issues: Vec::new(),
        };

        if let Some(value_node) = property_node.child(value) {
            issue.value = Some(value.to_string());
            issue.value_issues = get_unsupported_browsers(value_node, targets);
        }

        if issue.has_issues() {
            tracing::debug!(
                property = %issue.property,
                property_issues = issue.property_issues.len(),
                value_issues = issue.value_issues.len(),
                "Found compatibility issue"
            );
            issues.push(issue);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CompatDataset;
    use pretty_assertions::assert_eq;
    use shared_types::ReleaseStatus;

    const DATA: &str = r#"{
        "css": {"properties": {
            "display": {
                "__compat": {"support": {
                    "firefox": {"version_added": "1"},
                    "safari": {"version_added": true}
                }},
                "grid": {"__compat": {"support": {
                    "firefox": {"version_added": "52"},
                    "safari": {"version_added": "10.1"}
                }}},
                "contents": {"__compat": {"support": {
                    "firefox": {"version_added": "95"},
                    "safari": [
                        {"version_added": "11.1", "version_removed": "13"},
                        {"version_added": "13.1"}
                    ]
                }}}
            },
            "gap": {"__compat": {"support": {
                "firefox": {"version_added": "88", "version_removed": false},
                "safari": {"version_added": "10", "prefix": "-webkit-"}
            }}},
            "user-select": {"__compat": {"support": {
                "firefox": {"version_added": "69"},
                "safari": {"version_added": "3", "flags": [{"type": "preference", "name": "x"}]}
            }}},
            "zoom": {"__compat": {"support": {
                "safari": {"version_added": "3.1"}
            }}},
            "align-items": {
                "flex_context": {
                    "__compat": {"support": {"firefox": {"version_added": "20"}, "safari": {"version_added": "7"}}},
                    "baseline": {"__compat": {"support": {"firefox": {"version_added": "20"}}}}
                },
                "grid_context": {
                    "__compat": {"support": {"firefox": {"version_added": "52"}, "safari": {"version_added": "15"}}}
                }
            },
            "empty-node": {}
        }}
    }"#;

    fn target(browser: &str, version: &str) -> Target {
        Target {
            browser: browser.to_string(),
            brand_name: browser.to_string(),
            version: version.to_string(),
            status: ReleaseStatus::Current,
        }
    }

    fn properties() -> FeatureTree {
        CompatDataset::from_json_str(DATA).unwrap().css.properties
    }

    fn names(targets: &[Target]) -> Vec<String> {
        targets
            .iter()
            .map(|t| format!("{}@{}", t.browser, t.version))
            .collect()
    }

    #[test]
    fn test_missing_property_yields_no_issue() {
        let layout: StyleLayout = [("margin-trim", "block")].into_iter().collect();
        let issues = find_compatibility_issues(&layout, &properties(), &[target("firefox", "90")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_node_without_compat_is_supported_everywhere() {
        let props = properties();
        let targets = [target("firefox", "1"), target("safari", "1")];
        assert!(get_unsupported_browsers(&props["empty-node"], &targets).is_empty());
    }

    #[test]
    fn test_prefixed_support_counts_as_unsupported() {
        let props = properties();
        let unsupported =
            get_unsupported_browsers(&props["gap"], &[target("firefox", "90"), target("safari", "14")]);
        assert_eq!(names(&unsupported), vec!["safari@14"]);
    }

    #[test]
    fn test_flagged_support_counts_as_unsupported() {
        let props = properties();
        let unsupported = get_unsupported_browsers(&props["user-select"], &[target("safari", "14")]);
        assert_eq!(names(&unsupported), vec!["safari@14"]);
    }

    #[test]
    fn test_browser_without_entry_is_unsupported() {
        let props = properties();
        let unsupported = get_unsupported_browsers(&props["zoom"], &[target("firefox", "90")]);
        assert_eq!(names(&unsupported), vec!["firefox@90"]);
    }

    #[test]
    fn test_added_true_supports_version_zero() {
        let props = properties();
        assert!(get_unsupported_browsers(&props["display"], &[target("safari", "0")]).is_empty());
    }

    #[test]
    fn test_firefox_90_gap_example() {
        let props = properties();
        assert!(is_supported(&props["gap"], &target("firefox", "90")));
        let contents = props["display"].child("contents").unwrap();
        assert!(!is_supported(contents, &target("firefox", "90")));
    }

    #[test]
    fn test_any_matching_interval_supports() {
        let props = properties();
        let contents = props["display"].child("contents").unwrap();
        let unsupported = get_unsupported_browsers(
            contents,
            &[target("safari", "12"), target("safari", "13"), target("safari", "14")],
        );
        assert_eq!(names(&unsupported), vec!["safari@13"]);
    }

    #[test]
    fn test_unparseable_target_version_is_unsupported() {
        let props = properties();
        assert!(!is_supported(&props["gap"], &target("firefox", "preview")));
    }

    #[test]
    fn test_context_resolves_to_first_context() {
        let props = properties();
        let resolved = resolve_context(&props["align-items"]);
        assert!(resolved.child("baseline").is_some());

        // grid_context would flag safari 14, flex_context does not
        let unsupported = get_unsupported_browsers(&props["align-items"], &[target("safari", "14")]);
        assert!(unsupported.is_empty());
    }

    #[test]
    fn test_issue_collects_property_and_value() {
        let layout: StyleLayout = [
            ("from", "inline"),
            ("display", "contents"),
            ("gap", "4px"),
            ("user-select", "none"),
        ]
        .into_iter()
        .collect();
        let targets = [target("firefox", "90"), target("safari", "14")];

        let issues = find_compatibility_issues(&layout, &properties(), &targets);
        let props: Vec<_> = issues.iter().map(|i| i.property.as_str()).collect();
        assert_eq!(props, vec!["display", "gap", "user-select"]);

        let display = &issues[0];
        assert!(display.property_issues.is_empty());
        assert_eq!(display.value.as_deref(), Some("contents"));
        assert_eq!(names(&display.value_issues), vec!["firefox@90"]);

        let gap = &issues[1];
        assert_eq!(gap.value, None);
        assert_eq!(names(&gap.property_issues), vec!["safari@14"]);
    }

    #[test]
    fn test_supported_value_is_not_reported() {
        let layout: StyleLayout = [("display", "grid")].into_iter().collect();
        let issues =
            find_compatibility_issues(&layout, &properties(), &[target("firefox", "90"), target("safari", "14")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_reserved_from_key_is_ignored() {
        let mut props = properties();
        props.insert("from".to_string(), props["zoom"].clone());
        let layout: StyleLayout = [("from", "x")].into_iter().collect();

        let issues = find_compatibility_issues(&layout, &props, &[target("firefox", "90")]);
        assert!(issues.is_empty());
    }
}
