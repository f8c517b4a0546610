use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareCallError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The record store answered with `success: false`.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CareCallError {
    /// Store failures whose message reads like a missing record ("Patient not found").
    pub fn is_not_found(&self) -> bool {
        match self {
            CareCallError::NotFound(_) => true,
            CareCallError::Store(msg) => msg.to_lowercase().contains("not found"),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CareCallError>;
