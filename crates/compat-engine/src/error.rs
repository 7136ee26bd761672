use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse compatibility dataset: {0}")]
    DatasetParse(#[source] serde_json::Error),

    #[error("Failed to parse style layout: {0}")]
    LayoutParse(#[source] serde_json::Error),

    #[error("Compatibility dataset not loaded")]
    DatasetNotLoaded,

    #[error("Layout source failed: {0}")]
    LayoutSource(String),
}
