use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One website to crawl, as read from the target list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub brand: String,
    pub url: String,
}

/// One harvested email with its provenance. `source` is the URL that was
/// actually loaded when the email was captured, which may differ from the
/// target URL after a contact-page click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub brand: String,
    pub source: String,
    pub email: String,
}
