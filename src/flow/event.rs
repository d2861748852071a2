use crate::{
    flow::state::{Notice, Ticket},
    gateway::{GatewayError, SessionGateway, SignedIn},
    validation::Field,
};
use secrecy::SecretString;

/// Every way the flow state can change.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// Next onboarding page.
    Advance,
    /// Leave onboarding for the auth form.
    Skip,
    /// A keystroke-level update of one form field.
    Edit { field: Field, value: String },
    ToggleMode,
    Submit,
    SignInCompleted {
        ticket: Ticket,
        result: Result<SignedIn, GatewayError>,
    },
    RegisterCompleted {
        ticket: Ticket,
        result: Result<(), GatewayError>,
    },
    SignOut,
}

/// Work the reducer asks the runtime to do.
#[derive(Debug, Clone)]
pub enum Effect {
    Notify(Notice),
    Request(Request),
}

/// A network call with owned copies of the submitted credentials.
#[derive(Debug, Clone)]
pub enum Request {
    SignIn {
        ticket: Ticket,
        email: String,
        password: SecretString,
    },
    Register {
        ticket: Ticket,
        name: String,
        email: String,
        password: SecretString,
    },
}

impl Request {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::SignIn { ticket, .. } | Self::Register { ticket, .. } => *ticket,
        }
    }

    /// Runs the call and returns the completion event to feed back into the
    /// flow. Borrows nothing from the controller, so several calls may be in
    /// flight at once.
    pub async fn perform<G: SessionGateway + ?Sized>(self, gateway: &G) -> FlowEvent {
        match self {
            Self::SignIn {
                ticket,
                email,
                password,
            } => FlowEvent::SignInCompleted {
                ticket,
                result: gateway.sign_in(&email, &password).await,
            },
            Self::Register {
                ticket,
                name,
                email,
                password,
            } => FlowEvent::RegisterCompleted {
                ticket,
                result: gateway.register(&name, &email, &password).await,
            },
        }
    }
}
