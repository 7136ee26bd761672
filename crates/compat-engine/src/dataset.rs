//! Browser compatibility dataset model
//!
//! Mirrors the layout of MDN's browser-compat-data: a `browsers` table of
//! release channels and a `css.properties` tree whose nodes carry an optional
//! `__compat` statement plus child features (CSS values or `*_context` keys).
//! Only the fields the detector reads are modelled; the rest is ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_types::ReleaseStatus;

use crate::error::CompatError;
use crate::version::{SupportRange, VersionValue};

/// Feature name -> node, in dataset order
pub type FeatureTree = IndexMap<String, FeatureNode>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatDataset {
    #[serde(default)]
    pub browsers: BTreeMap<String, BrowserInfo>,
    #[serde(default)]
    pub css: CssData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssData {
    #[serde(default)]
    pub properties: FeatureTree,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserInfo {
    pub name: String, // Brand name shown to users
    #[serde(default)]
    pub releases: IndexMap<String, Release>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub status: ReleaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureNode {
    #[serde(rename = "__compat", default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<CompatStatement>,
    #[serde(flatten)]
    pub children: FeatureTree,
}

impl FeatureNode {
    pub fn compat(&self) -> Option<&CompatStatement> {
        self.compat.as_ref()
    }

    pub fn child(&self, name: &str) -> Option<&FeatureNode> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &FeatureNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatStatement {
    #[serde(default)]
    pub support: IndexMap<String, SupportEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FeatureStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdn_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompatStatement {
    /// Support statements for a browser; empty when the browser is not listed
    pub fn support_for(&self, browser: &str) -> &[SupportStatement] {
        self.support
            .get(browser)
            .map(SupportEntry::statements)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureStatus {
    #[serde(default)]
    pub experimental: bool,
    #[serde(default)]
    pub standard_track: bool,
    #[serde(default)]
    pub deprecated: bool,
}

/// A browser's support is recorded either as one statement or a list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportEntry {
    Multiple(Vec<SupportStatement>),
    Single(SupportStatement),
}

impl SupportEntry {
    pub fn statements(&self) -> &[SupportStatement] {
        match self {
            SupportEntry::Multiple(statements) => statements,
            SupportEntry::Single(statement) => std::slice::from_ref(statement),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportStatement {
    #[serde(default)]
    pub version_added: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_removed: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub partial_implementation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<serde_json::Value>,
}

impl SupportStatement {
    /// Prefixed or flag-gated support does not count as support
    pub fn is_unconditional(&self) -> bool {
        let prefixed = self.prefix.as_deref().is_some_and(|p| !p.is_empty());
        !prefixed && self.flags.is_none()
    }

    pub fn range(&self) -> SupportRange {
        SupportRange::new(self.version_added.as_ref(), self.version_removed.as_ref())
    }
}

impl CompatDataset {
    pub fn from_json_str(json: &str) -> Result<Self, CompatError> {
        let dataset: CompatDataset =
            serde_json::from_str(json).map_err(CompatError::DatasetParse)?;
        dataset.log_loaded();
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CompatError> {
        let dataset: CompatDataset =
            serde_json::from_reader(reader).map_err(CompatError::DatasetParse)?;
        dataset.log_loaded();
        Ok(dataset)
    }

    /// Load a dataset from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompatError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CompatError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn css_properties(&self) -> &FeatureTree {
        &self.css.properties
    }

    pub fn browser(&self, id: &str) -> Option<&BrowserInfo> {
        self.browsers.get(id)
    }

    fn log_loaded(&self) {
        tracing::debug!(
            browsers = self.browsers.len(),
            properties = self.css.properties.len(),
            "Loaded compatibility dataset"
        );
    }
}
