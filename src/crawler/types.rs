// src/crawler/types.rs
use crate::models::Finding;
use thiserror::Error;

/// Recoverable per-target failures. Every variant is contained at the target
/// boundary; none of them aborts the run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("navigation timed out after {0}ms")]
    NavigationTimeout(u64),
    #[error("content capture failed: {0}")]
    Capture(String),
    #[error("content capture timed out after {0}ms")]
    CaptureTimeout(u64),
}

/// Terminal state of one target's crawl. Zero findings is still a completed
/// crawl; a failure keeps the brand so the run summary can name it.
#[derive(Debug)]
pub enum CrawlOutcome {
    Harvested { findings: Vec<Finding> },
    Failed { brand: String, reason: CrawlError },
}
