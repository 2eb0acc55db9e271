use thiserror::Error;

/// Custom error type for authentication, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Bad parameter {0}")]
    BadParam(String),
    #[error("HTTP Error: {0}")]
    HTTP(String),
    #[error("Error retrieving token for {0}")]
    Retrieval(String),
    #[error("Invalid token in {0}")]
    Invalid(String),
}

/// Errors out of a source access; all recoverable from the engine's point of
/// view (an operation degrades to "no data", the process never dies on these).
///
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Auth: {0}")]
    Auth(#[from] AuthError),
    #[error("Can not decode payload: {0}")]
    Decode(String),
    #[error("HTTP error: {0}")]
    HTTP(#[from] reqwest::Error),
    #[error("No route {0} defined for this site")]
    NoRoute(String),
    #[error("Error({0}): {1}")]
    Status(u16, String),
    #[error("No such site {0}")]
    UnknownSite(String),
}
