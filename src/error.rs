use axum::http::StatusCode;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Message is required")]
    InvalidInput,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Missing API key for {provider}. Set one of: {vars}")]
    MissingApiKey {
        provider: &'static str,
        vars: &'static str,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// status code used when this error crosses the http boundary
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidInput => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// true for failures that happened talking to the model provider
    pub fn is_provider(&self) -> bool {
        matches!(self, Error::Provider(_) | Error::Http(_))
    }
}
