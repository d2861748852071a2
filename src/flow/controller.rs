use crate::{
    flow::{
        config::FlowConfig,
        event::{Effect, FlowEvent, Request},
        notify::Notifier,
        router::Screen,
        state::FlowState,
        update::update,
    },
    gateway::SessionGateway,
    validation::Field,
};
use tracing::debug;

/// Owns the flow state and runs the reducer's effects.
///
/// Two ways to drive network calls:
/// - [`AuthFlowController::submit`] awaits the call and applies its completion,
///   which suits tests and simple front-ends;
/// - [`AuthFlowController::dispatch`] returns the [`Request`] so an event loop can
///   run it elsewhere (see [`Request::perform`]) and feed the completion back
///   with another `dispatch`.
pub struct AuthFlowController<G, N> {
    config: FlowConfig,
    state: FlowState,
    gateway: G,
    notifier: N,
}

impl<G: SessionGateway, N: Notifier> AuthFlowController<G, N> {
    pub fn new(config: FlowConfig, gateway: G, notifier: N) -> Self {
        Self {
            state: FlowState::new(&config),
            config,
            gateway,
            notifier,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    /// Applies one event, delivers its notices and hands back the network call
    /// it started, if any.
    pub fn dispatch(&mut self, event: FlowEvent) -> Option<Request> {
        let mut request = None;

        for effect in update(&mut self.state, &self.config, event) {
            match effect {
                Effect::Notify(notice) => self.notifier.notify(&notice),
                Effect::Request(next) => {
                    debug!("Request {:?} started", next.ticket());
                    request = Some(next);
                }
            }
        }

        request
    }

    /// Dispatches an event and, if it started a call, waits for it and applies
    /// the result.
    pub async fn run(&mut self, event: FlowEvent) {
        if let Some(request) = self.dispatch(event) {
            let completion = request.perform(&self.gateway).await;
            self.dispatch(completion);
        }
    }

    pub fn advance(&mut self) {
        self.dispatch(FlowEvent::Advance);
    }

    pub fn skip(&mut self) {
        self.dispatch(FlowEvent::Skip);
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(FlowEvent::Edit {
            field,
            value: value.into(),
        });
    }

    pub fn toggle_mode(&mut self) {
        self.dispatch(FlowEvent::ToggleMode);
    }

    pub async fn submit(&mut self) {
        self.run(FlowEvent::Submit).await;
    }

    pub fn sign_out(&mut self) {
        self.dispatch(FlowEvent::SignOut);
    }
}
