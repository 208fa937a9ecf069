//! Output module for serializing crawl results
//!
//! The crawl hands its finished [`CrawlReport`] to this module, which owns
//! serialization to the JSON results file and the stdout summary.

mod report;

pub use report::{print_summary, write_report, CrawlReport};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize results: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
