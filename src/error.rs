use thiserror::Error;

/// Construction-time failures. Runtime auth failures are reported through
/// [`crate::gateway::GatewayError`] and never abort the flow.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported service url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
