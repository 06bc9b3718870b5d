#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The backend rejected the call; `message` comes from its payload when
    /// present, otherwise a per-endpoint fallback.
    #[error("{message}")]
    Backend { status: u16, message: String },
}
