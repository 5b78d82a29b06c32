//! Error types for the harvest pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    /// A run option is missing or out of range; fatal at startup
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A subgraph page failed or was malformed; aborts the current cycle
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// A contract call failed to broadcast or to reach confirmation depth
    #[error("Submission failed: {0}")]
    Submission(String),

    /// A non-critical chain read failed
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type HarvestResult<T> = Result<T, HarvestError>;
