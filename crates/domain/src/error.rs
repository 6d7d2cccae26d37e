/// Shared error type used across all ToriiGuide crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("validation: {0}")]
    Validation(String),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    /// An upstream provider (Places or LLM) returned a non-success status
    /// or an unusable body.
    #[error("upstream {service}: {message}")]
    Upstream { service: String, message: String },

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),

    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an upstream failure of the Places provider.
    pub fn places(message: impl Into<String>) -> Self {
        Error::Upstream {
            service: "places".into(),
            message: message.into(),
        }
    }

    /// Shorthand for an upstream failure of the LLM provider.
    pub fn llm(message: impl Into<String>) -> Self {
        Error::Upstream {
            service: "llm".into(),
            message: message.into(),
        }
    }
}
