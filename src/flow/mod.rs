//! Onboarding, auth-mode and session handling for the storefront entry screen.
//!
//! State changes flow one way: a [`FlowEvent`] goes through the reducer
//! ([`update::update`]), which returns [`Effect`]s. Notices are handed to the
//! [`Notifier`]; network [`Request`]s are run against a
//! [`crate::gateway::SessionGateway`] and their completions come back as events.

pub mod config;
pub mod controller;
pub mod event;
pub mod notify;
pub mod onboarding;
pub mod router;
pub mod state;
pub mod update;

pub use self::config::{DraftPolicy, FlowConfig};
pub use self::controller::AuthFlowController;
pub use self::event::{Effect, FlowEvent, Request};
pub use self::notify::{LogNotifier, Notifier};
pub use self::onboarding::OnboardingState;
pub use self::router::{route, Screen};
pub use self::state::{AuthMode, AuthPhase, FlowState, Notice, NoticeKind, Session, Ticket};
