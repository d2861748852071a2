//! The single state value owned by the flow controller. Fields are only mutated
//! by the reducer in [`super::update`]; everything else reads through getters.

use crate::{
    flow::{config::FlowConfig, onboarding::OnboardingState, router::Screen},
    validation::Credentials,
};
use std::fmt;

/// Which variant of the auth form is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

impl AuthMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Register,
            Self::Register => Self::SignIn,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignIn => f.write_str("sign in"),
            Self::Register => f.write_str("create account"),
        }
    }
}

/// In-memory record of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated { mode: AuthMode },
    Authenticated(Session),
}

impl Default for AuthPhase {
    fn default() -> Self {
        Self::Unauthenticated {
            mode: AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// A message for the user, shown by whatever presentation layer is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }
}

/// Identifies one submission; completions carrying any other ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingKind {
    SignIn,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub(crate) ticket: Ticket,
    pub(crate) kind: PendingKind,
}

#[derive(Debug, Clone)]
pub struct FlowState {
    pub(crate) onboarding: OnboardingState,
    pub(crate) phase: AuthPhase,
    pub(crate) draft: Credentials,
    pub(crate) pending: Option<Pending>,
    pub(crate) next_ticket: u64,
    pub(crate) last_notice: Option<Notice>,
}

impl FlowState {
    #[must_use]
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            onboarding: config.initial_onboarding(),
            phase: AuthPhase::default(),
            draft: Credentials::default(),
            pending: None,
            next_ticket: 0,
            last_notice: None,
        }
    }

    #[must_use]
    pub fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    #[must_use]
    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    /// Current form mode, or `None` once signed in.
    #[must_use]
    pub fn mode(&self) -> Option<AuthMode> {
        match self.phase {
            AuthPhase::Unauthenticated { mode } => Some(mode),
            AuthPhase::Authenticated(_) => None,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            AuthPhase::Authenticated(session) => Some(session),
            AuthPhase::Unauthenticated { .. } => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    #[must_use]
    pub fn draft(&self) -> &Credentials {
        &self.draft
    }

    /// True while a submission is waiting for the service.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Most recent notice, cleared on successful sign-in and sign-out.
    #[must_use]
    pub fn last_notice(&self) -> Option<&Notice> {
        self.last_notice.as_ref()
    }

    /// Screen to render for this state.
    #[must_use]
    pub fn screen(&self) -> Screen {
        super::router::route(&self.onboarding, &self.phase)
    }

    pub(crate) fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }
}
