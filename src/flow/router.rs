use crate::flow::{
    onboarding::OnboardingState,
    state::{AuthMode, AuthPhase},
};

/// The three top-level views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Onboarding {
        step: u32,
        title: Option<&'static str>,
    },
    AuthForm {
        mode: AuthMode,
    },
    Protected {
        display_name: String,
    },
}

/// Picks the view for the current state. Holds no state of its own.
#[must_use]
pub fn route(onboarding: &OnboardingState, phase: &AuthPhase) -> Screen {
    if !onboarding.is_complete() {
        return Screen::Onboarding {
            step: onboarding.step(),
            title: onboarding.title(),
        };
    }

    match phase {
        AuthPhase::Authenticated(session) => Screen::Protected {
            display_name: session.display_name.clone(),
        },
        AuthPhase::Unauthenticated { mode } => Screen::AuthForm { mode: *mode },
    }
}
