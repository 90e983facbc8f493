use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("no word given")]
    EmptyName,
    #[error("clip not found: {0}")]
    NotFound(String),
    #[error("no frames found")]
    Empty,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid clip JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timed out loading {0}")]
    TimedOut(String),
}

#[derive(Debug, Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);
