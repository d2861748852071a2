use crate::{
    error::Result,
    gateway::{
        types::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, DEFAULT_ROLE},
        GatewayConfig, GatewayError, SessionGateway, SignedIn, MSG_ALREADY_REGISTERED,
        MSG_INVALID_CREDENTIALS, MSG_REGISTER_FAILED, MSG_UNREACHABLE,
    },
    APP_USER_AGENT,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn, Span};
use ulid::Ulid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// `SessionGateway` backed by JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self { client, config })
    }

    /// Sends one POST with a JSON body. Only a missing response is an error here;
    /// HTTP status handling is left to the caller.
    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Response, reqwest::Error> {
        let request_id = Ulid::new().to_string();
        Span::current().record("request_id", request_id.as_str());

        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body);

        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        request.send().await
    }
}

/// Reads `message` from an error body, treating an absent, empty or
/// undecodable body as no message.
async fn rejection_message(response: Response) -> Option<String> {
    response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

#[async_trait]
impl SessionGateway for HttpGateway {
    #[instrument(skip(self, email, password), fields(request_id))]
    async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> std::result::Result<SignedIn, GatewayError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };

        let response = match self.post("/login", &body).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Login request failed: {}", e);

                return Err(GatewayError::Unreachable(MSG_UNREACHABLE.to_string()));
            }
        };

        let status = response.status();

        if !status.is_success() {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| MSG_INVALID_CREDENTIALS.to_string());

            debug!("Login rejected: {}", status);

            return Err(GatewayError::Rejected(message));
        }

        match response.json::<LoginResponse>().await {
            Ok(body) => {
                info!("Login accepted");

                Ok(SignedIn {
                    display_name: body.name,
                })
            }
            Err(e) => {
                error!("Error decoding login response: {}", e);

                Err(GatewayError::Unreachable(MSG_UNREACHABLE.to_string()))
            }
        }
    }

    #[instrument(skip(self, name, email, password), fields(request_id))]
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> std::result::Result<(), GatewayError> {
        let body = RegisterRequest {
            nombre: name,
            email,
            password: password.expose_secret(),
            rol: DEFAULT_ROLE,
        };

        let response = match self.post("/register", &body).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Register request failed: {}", e);

                return Err(GatewayError::Unreachable(MSG_REGISTER_FAILED.to_string()));
            }
        };

        let status = response.status();

        if status.is_success() {
            info!("Account created");

            Ok(())
        } else {
            let message = rejection_message(response)
                .await
                .unwrap_or_else(|| MSG_ALREADY_REGISTERED.to_string());

            debug!("Register rejected: {}", status);

            Err(GatewayError::Rejected(message))
        }
    }
}
