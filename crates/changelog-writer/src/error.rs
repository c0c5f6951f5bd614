//! Error types for changelog-writer

use changelog_core::CoreError;

/// Errors raised while building or rendering a changelog
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error returned by a caller-supplied transform, passed through as is
    #[error(transparent)]
    Transform(anyhow::Error),

    #[error("Template compilation failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WriterError>;
