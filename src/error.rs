use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisconnectError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request returned status code {}", .0.as_u16())]
    BadStatus(StatusCode),

    #[error("Malformed tracker list: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Category {0:?} not found in tracker list")]
    MissingCategory(String),

    #[error("Site entry #{index} is unusable: {reason}")]
    InvalidSite {
        index: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DisconnectError>;
