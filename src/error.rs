pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No response was received from the backend.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a failure envelope or a non-2xx status.
    #[error(
        "API error{}: {}",
        .status.map(|s| format!(" ({})", s)).unwrap_or_default(),
        .message.as_deref().unwrap_or("request was not successful")
    )]
    Api {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn api(status: Option<u16>, message: Option<String>) -> Self {
        Error::Api {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }
}
