use compat_engine::{report, CompatDataset, CompatEngine, CompatError};
use shared_types::{Issue, StyleLayout};
use wasm_bindgen::prelude::*;

/// Panel state the host devtools page drives on inspector events
#[wasm_bindgen]
#[derive(Default)]
pub struct CompatPanel {
    engine: Option<CompatEngine>,
    issues: Option<Vec<Issue>>,
}

impl CompatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_dataset(&mut self, dataset_json: &str) -> Result<usize, CompatError> {
        let engine = CompatEngine::new(CompatDataset::from_json_str(dataset_json)?);
        let targets = engine.targets().len();
        self.engine = Some(engine);
        self.clear_issues();
        Ok(targets)
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn set_issues(&mut self, issues: Vec<Issue>) {
        self.issues = Some(issues);
    }

    /// Check a layout JSON object and store its issue list
    pub fn check_layout(&mut self, layout_json: &str) -> Result<usize, CompatError> {
        let engine = self.engine.as_ref().ok_or(CompatError::DatasetNotLoaded)?;
        let layout: StyleLayout =
            serde_json::from_str(layout_json).map_err(CompatError::LayoutParse)?;
        let issues = engine.check_layout(&layout);
        let count = issues.len();
        self.set_issues(issues);
        Ok(count)
    }

    pub fn issues(&self) -> &[Issue] {
        self.issues.as_deref().unwrap_or(&[])
    }

    /// Issues where the given browser id lacks support for the property or value
    pub fn issues_for_browser(&self, browser: &str) -> Vec<&Issue> {
        self.issues()
            .iter()
            .filter(|issue| {
                issue
                    .property_issues
                    .iter()
                    .chain(issue.value_issues.iter())
                    .any(|target| target.browser == browser)
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self.issues()).unwrap_or_default()
    }

    /// Rendered issue list; `None` until a layout has been checked
    pub fn summary(&self) -> Option<String> {
        report::render_issue_list(self.issues.as_deref())
    }

    pub fn clear_issues(&mut self) {
        self.issues = None;
    }
}

// WASM bindings
#[wasm_bindgen]
impl CompatPanel {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm() -> Self {
        console_error_panic_hook::set_once();
        Self::new()
    }

    #[wasm_bindgen(js_name = loadDataset)]
    pub fn load_dataset_wasm(&mut self, dataset_json: &str) -> Result<u32, JsValue> {
        self.load_dataset(dataset_json)
            .map(|targets| targets as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = checkLayout)]
    pub fn check_layout_wasm(&mut self, layout_json: &str) -> Result<u32, JsValue> {
        self.check_layout(layout_json)
            .map(|count| count as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = getIssuesJson)]
    pub fn get_issues_json(&self) -> String {
        self.to_json()
    }

    #[wasm_bindgen(js_name = getTargetsJson)]
    pub fn get_targets_json(&self) -> String {
        self.engine
            .as_ref()
            .and_then(|engine| serde_json::to_string(engine.targets()).ok())
            .unwrap_or_else(|| "[]".to_string())
    }

    #[wasm_bindgen(js_name = getIssueCount)]
    pub fn get_issue_count(&self) -> u32 {
        self.issues().len() as u32
    }

    #[wasm_bindgen(js_name = getPropertyIssueCount)]
    pub fn get_property_issue_count(&self) -> u32 {
        self.issues()
            .iter()
            .filter(|issue| !issue.property_issues.is_empty())
            .count() as u32
    }

    #[wasm_bindgen(js_name = getValueIssueCount)]
    pub fn get_value_issue_count(&self) -> u32 {
        self.issues()
            .iter()
            .filter(|issue| !issue.value_issues.is_empty())
            .count() as u32
    }

    #[wasm_bindgen(js_name = getSummary)]
    pub fn get_summary(&self) -> Option<String> {
        self.summary()
    }

    #[wasm_bindgen(js_name = clearIssues)]
    pub fn clear_issues_wasm(&mut self) {
        self.clear_issues();
    }
}
