//! # Divina (storefront onboarding and sign-in flow)
//!
//! `divina` drives the first screens of the Divina Mujer storefront: a short
//! onboarding carousel, then a single form that toggles between signing in and
//! creating an account, and finally a protected view once the user is signed in.
//!
//! ## Flow
//!
//! All state lives in one [`flow::FlowState`] value and only changes through
//! named [`flow::FlowEvent`]s processed by the reducer in [`flow::update`]. The
//! reducer never touches the network; it returns effects that the
//! [`flow::AuthFlowController`] executes against a [`gateway::SessionGateway`].
//!
//! ## Authentication service
//!
//! The remote service is reached over two JSON endpoints, `POST /login` and
//! `POST /register`. No token is issued or stored: the session is purely local
//! UI state holding the display name returned by the login call.
//!
//! Passwords are kept in `SecretString` and must never be logged.

pub mod cli;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub use error::{Error, Result};
