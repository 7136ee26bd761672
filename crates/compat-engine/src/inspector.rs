//! Inspector-driven update cycle
//!
//! The host inspector notifies the panel when the selected node or the
//! document root changes. Each notification re-fetches the computed layout of
//! the selection and replaces the panel's issue list. Rendering the result is
//! left to the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Issue, IssueList, StyleLayout};

use crate::error::CompatError;
use crate::report;
use crate::CompatEngine;

/// Opaque handle the host uses to identify a DOM node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef(pub String);

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        NodeRef(id.into())
    }
}

/// Current inspector selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub node: Option<NodeRef>,
    pub connected: bool,
    pub element: bool,
}

impl Selection {
    /// A connected element node
    pub fn element(node: NodeRef) -> Self {
        Self {
            node: Some(node),
            connected: true,
            element: true,
        }
    }

    /// Only connected element nodes have a style layout worth checking
    pub fn inspectable_node(&self) -> Option<&NodeRef> {
        if self.connected && self.element {
            self.node.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorEvent {
    /// The inspected document root was replaced
    NewRoot,
    /// A different node was selected
    NewNodeFront,
}

/// Host call that computes the style layout of a node
#[async_trait]
pub trait LayoutSource {
    async fn get_layout(&self, node: &NodeRef) -> Result<StyleLayout, CompatError>;
}

pub struct CompatibilityPanel<S> {
    source: S,
    engine: CompatEngine,
    issue_list: Option<IssueList>,
}

impl<S: LayoutSource + Send + Sync> CompatibilityPanel<S> {
    pub fn new(source: S, engine: CompatEngine) -> Self {
        Self {
            source,
            engine,
            issue_list: None,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: InspectorEvent,
        selection: &Selection,
    ) -> Result<bool, CompatError> {
        tracing::debug!(?event, "Inspector event");
        self.update(selection).await
    }

    /// Re-check the selection; returns false when the selection is not inspectable
    ///
    /// A failed layout fetch keeps the previous issue list.
    pub async fn update(&mut self, selection: &Selection) -> Result<bool, CompatError> {
        let Some(node) = selection.inspectable_node() else {
            return Ok(false);
        };

        let layout = self.source.get_layout(node).await?;
        let issues = self.engine.check_layout(&layout);

        tracing::debug!(node = %node.0, issues = issues.len(), "Updated compatibility issues");
        self.issue_list = Some(issues);
        Ok(true)
    }

    pub fn issue_list(&self) -> Option<&[Issue]> {
        self.issue_list.as_deref()
    }

    pub fn engine(&self) -> &CompatEngine {
        &self.engine
    }

    /// Text the panel shows; `None` before the first successful update
    pub fn render(&self) -> Option<String> {
        report::render_issue_list(self.issue_list())
    }
}
