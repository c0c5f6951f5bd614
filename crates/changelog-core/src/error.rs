//! Error types for changelog-core

/// Errors specific to changelog-core
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed commit input: {0}")]
    MalformedInput(String),
}
