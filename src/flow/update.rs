//! Flow reducer.
//!
//! All state mutations happen here. The controller calls
//! `update(state, config, event)` and executes the returned effects. The reducer
//! never awaits and never talks to the network.

use crate::{
    flow::{
        config::{DraftPolicy, FlowConfig},
        event::{Effect, FlowEvent, Request},
        state::{AuthMode, AuthPhase, FlowState, Notice, Pending, PendingKind, Session, Ticket},
    },
    gateway::{GatewayError, SignedIn},
    validation::validate_sign_in,
};
use tracing::debug;

pub const MSG_REGISTERED: &str = "account created successfully";

/// The main reducer function.
pub fn update(state: &mut FlowState, config: &FlowConfig, event: FlowEvent) -> Vec<Effect> {
    match event {
        FlowEvent::Advance => {
            state.onboarding.advance();
            vec![]
        }
        FlowEvent::Skip => {
            state.onboarding.skip();
            vec![]
        }
        FlowEvent::Edit { field, value } => {
            if form_visible(state) {
                state.draft.set(field, value);
            }
            vec![]
        }
        FlowEvent::ToggleMode => {
            handle_toggle(state, config);
            vec![]
        }
        FlowEvent::Submit => handle_submit(state, config),
        FlowEvent::SignInCompleted { ticket, result } => handle_sign_in_result(state, ticket, result),
        FlowEvent::RegisterCompleted { ticket, result } => {
            handle_register_result(state, ticket, result)
        }
        FlowEvent::SignOut => {
            handle_sign_out(state);
            vec![]
        }
    }
}

// ============================================================================
// Form Handlers
// ============================================================================

/// The auth form only accepts input once onboarding is over and nobody is
/// signed in.
fn form_visible(state: &FlowState) -> bool {
    state.onboarding.is_complete() && !state.is_authenticated()
}

fn handle_toggle(state: &mut FlowState, config: &FlowConfig) {
    if !form_visible(state) {
        return;
    }

    // A completion is interpreted in the mode its call was started from.
    if let Some(pending) = state.pending {
        debug!("Ignoring mode toggle while request {:?} is in flight", pending.ticket);
        return;
    }

    if let AuthPhase::Unauthenticated { mode } = &mut state.phase {
        *mode = mode.toggled();
        debug!("Auth mode switched to {}", mode);

        if config.draft_policy == DraftPolicy::ClearOnToggle {
            state.draft.clear();
        }
    }
}

fn handle_submit(state: &mut FlowState, config: &FlowConfig) -> Vec<Effect> {
    let Some(mode) = state.mode() else {
        return vec![];
    };

    if !state.onboarding.is_complete() {
        debug!("Ignoring submit before onboarding is complete");
        return vec![];
    }

    if let Some(pending) = state.pending {
        debug!("Ignoring submit while request {:?} is in flight", pending.ticket);
        return vec![];
    }

    match mode {
        AuthMode::SignIn => submit_sign_in(state),
        AuthMode::Register => submit_register(state, config),
    }
}

fn submit_sign_in(state: &mut FlowState) -> Vec<Effect> {
    if let Err(e) = validate_sign_in(&state.draft.email, &state.draft.password) {
        return vec![notify(state, Notice::error(e.message))];
    }

    let ticket = begin(state, PendingKind::SignIn);

    vec![Effect::Request(Request::SignIn {
        ticket,
        email: state.draft.email.clone(),
        password: state.draft.password.clone(),
    })]
}

fn submit_register(state: &mut FlowState, config: &FlowConfig) -> Vec<Effect> {
    if config.validate_registration {
        if let Err(errors) = config.rules.validate_registration(&state.draft) {
            debug!("Registration draft rejected on {}", errors.first().field);
            return vec![notify(state, Notice::error(errors.first().message.clone()))];
        }
    }

    let ticket = begin(state, PendingKind::Register);

    vec![Effect::Request(Request::Register {
        ticket,
        name: state.draft.name.clone(),
        email: state.draft.email.clone(),
        password: state.draft.password.clone(),
    })]
}

fn begin(state: &mut FlowState, kind: PendingKind) -> Ticket {
    let ticket = state.issue_ticket();
    state.pending = Some(Pending { ticket, kind });
    ticket
}

// ============================================================================
// Completion Handlers
// ============================================================================

/// Clears the pending slot if `ticket` owns it. Returns false for stale
/// completions, which must not change state.
fn settle(state: &mut FlowState, ticket: Ticket, kind: PendingKind) -> bool {
    match state.pending {
        Some(pending) if pending.ticket == ticket && pending.kind == kind => {
            state.pending = None;
            true
        }
        _ => {
            debug!("Discarding stale completion {:?}", ticket);
            false
        }
    }
}

fn handle_sign_in_result(
    state: &mut FlowState,
    ticket: Ticket,
    result: Result<SignedIn, GatewayError>,
) -> Vec<Effect> {
    if !settle(state, ticket, PendingKind::SignIn) {
        return vec![];
    }

    match result {
        Ok(signed_in) => {
            state.phase = AuthPhase::Authenticated(Session {
                display_name: signed_in.display_name,
            });
            state.last_notice = None;
            vec![]
        }
        Err(e) => vec![notify(state, Notice::error(e.message()))],
    }
}

fn handle_register_result(
    state: &mut FlowState,
    ticket: Ticket,
    result: Result<(), GatewayError>,
) -> Vec<Effect> {
    if !settle(state, ticket, PendingKind::Register) {
        return vec![];
    }

    match result {
        Ok(()) => {
            if let AuthPhase::Unauthenticated { mode } = &mut state.phase {
                *mode = AuthMode::SignIn;
            }
            vec![notify(state, Notice::success(MSG_REGISTERED))]
        }
        Err(e) => vec![notify(state, Notice::error(e.message()))],
    }
}

// ============================================================================
// Session Handlers
// ============================================================================

fn handle_sign_out(state: &mut FlowState) {
    if !state.is_authenticated() {
        return;
    }

    state.phase = AuthPhase::Unauthenticated {
        mode: AuthMode::SignIn,
    };
    state.draft.clear_passwords();
    state.last_notice = None;
}

fn notify(state: &mut FlowState, notice: Notice) -> Effect {
    state.last_notice = Some(notice.clone());
    Effect::Notify(notice)
}
