//! Wire payloads for the authentication service. Request bodies carry the
//! plaintext password, so they intentionally do not implement `Debug`.

use serde::{Deserialize, Serialize};

/// Account category assigned to every self-registered user.
pub const DEFAULT_ROLE: &str = "cliente";

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub nombre: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub rol: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "nombre")]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}
