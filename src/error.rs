use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("required element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("element {selector} did not become visible within {timeout:?}")]
    VisibilityTimeout { selector: String, timeout: Duration },

    #[error("{0}")]
    Usage(String),

    #[error("invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("report write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

impl ScrapeError {
    pub fn not_found(selector: &str) -> Self {
        Self::ElementNotFound {
            selector: selector.to_string(),
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
