use thiserror::Error;

/// Fatal pipeline failures. Per-listing gaps (missing price, unparseable
/// specs) are never errors; they degrade to skips or unknown fields.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no embedded product data found (missing `window.__INITIAL_STATE__` marker); was the page saved with 'Save Page As'?")]
    BlobNotFound,

    #[error("embedded product data is malformed: {0}")]
    BlobMalformed(String),

    #[error("unexpected page data shape: {0}")]
    SchemaMismatch(String),
}

/// Script marker preceding the embedded store state on Best Buy Canada pages.
pub const ANCHOR: &str = "window.__INITIAL_STATE__";

pub type Result<T> = std::result::Result<T, PipelineError>;
