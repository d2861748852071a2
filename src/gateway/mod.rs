//! Boundary to the remote authentication service. This is the only module that
//! talks to the network: it takes owned copies of the submitted credentials and
//! returns a normalized result, never touching caller state. Each call issues
//! exactly one request; there is no retry.

pub mod http;
pub mod types;

pub use self::http::HttpGateway;

use crate::error::{Error, Result};
use async_trait::async_trait;
use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error as ThisError;
use url::Url;

/// Service address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:5000";

pub const MSG_INVALID_CREDENTIALS: &str = "invalid credentials";
pub const MSG_UNREACHABLE: &str = "could not reach server";
pub const MSG_ALREADY_REGISTERED: &str = "this email is already registered";
pub const MSG_REGISTER_FAILED: &str = "could not register";

/// Failure of a gateway call. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum GatewayError {
    /// The service answered and refused the request.
    #[error("{0}")]
    Rejected(String),
    /// No usable response was obtained (connection, DNS, timeout, bad body).
    #[error("{0}")]
    Unreachable(String),
}

impl GatewayError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected(message) | Self::Unreachable(message) => message,
        }
    }
}

/// Successful sign-in payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub display_name: String,
}

#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Exchanges email and password for the account's display name.
    async fn sign_in(&self, email: &str, password: &SecretString)
        -> Result<SignedIn, GatewayError>;

    /// Creates a customer account. Does not sign the user in.
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), GatewayError>;
}

#[async_trait]
impl<G: SessionGateway + ?Sized> SessionGateway for std::sync::Arc<G> {
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SignedIn, GatewayError> {
        (**self).sign_in(email, password).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), GatewayError> {
        (**self).register(name, email, password).await
    }
}

/// Where and how to reach the authentication service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: Url,
    /// `None` waits for the service indefinitely.
    pub timeout: Option<Duration>,
}

impl GatewayConfig {
    /// # Errors
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn parse(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())?;

        match base_url.scheme() {
            "http" | "https" => Ok(Self { base_url, timeout }),
            scheme => Err(Error::UnsupportedScheme(scheme.to_string())),
        }
    }

    /// Joins an endpoint path onto the base URL, keeping any base path prefix.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim().trim_start_matches('/'))
    }
}
