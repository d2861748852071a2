//! Line-oriented terminal front-end. Renders the routed screen after every
//! command and keeps reading input while network calls are in flight; their
//! completions are fed back to the controller as they arrive.

use crate::{
    flow::{
        AuthFlowController, AuthMode, FlowConfig, FlowEvent, Notice, NoticeKind, Notifier, Screen,
    },
    gateway::{GatewayConfig, HttpGateway},
    validation::Field,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::{debug, error, info};

const HELP: &str = "commands: next | skip | name <v> | email <v> | password <v> | confirm <v> | toggle | submit | signout | help | quit";

#[derive(Debug)]
pub struct Args {
    pub gateway: GatewayConfig,
    pub flow: FlowConfig,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Event(InputEvent),
    Help,
    Quit,
}

/// Inputs that map onto flow events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Next,
    Skip,
    Edit(Field, String),
    Toggle,
    Submit,
    SignOut,
}

impl From<InputEvent> for FlowEvent {
    fn from(input: InputEvent) -> Self {
        match input {
            InputEvent::Next => Self::Advance,
            InputEvent::Skip => Self::Skip,
            InputEvent::Edit(field, value) => Self::Edit { field, value },
            InputEvent::Toggle => Self::ToggleMode,
            InputEvent::Submit => Self::Submit,
            InputEvent::SignOut => Self::SignOut,
        }
    }
}

/// Parses a command line. Field values keep inner spaces; an empty value clears
/// the field.
///
/// # Errors
/// Returns a short message for unknown commands.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let edit = |field: Field| -> Result<Input, String> {
        Ok(Input::Event(InputEvent::Edit(field, rest.to_string())))
    };

    match command.to_lowercase().as_str() {
        "next" | "n" => Ok(Input::Event(InputEvent::Next)),
        "skip" => Ok(Input::Event(InputEvent::Skip)),
        "name" => edit(Field::Name),
        "email" => edit(Field::Email),
        "password" => edit(Field::Password),
        "confirm" => edit(Field::ConfirmPassword),
        "toggle" => Ok(Input::Event(InputEvent::Toggle)),
        "submit" | "s" => Ok(Input::Event(InputEvent::Submit)),
        "signout" | "logout" => Ok(Input::Event(InputEvent::SignOut)),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        "" => Err(String::new()),
        other => Err(format!("unknown command: {other} ({HELP})")),
    }
}

/// Text for one screen.
#[must_use]
pub fn render(screen: &Screen, busy: bool) -> String {
    match screen {
        Screen::Onboarding { step, title } => format!(
            "[{}] {}\n  next | skip",
            step + 1,
            title.unwrap_or("Divina Mujer")
        ),
        Screen::AuthForm { mode } => {
            let (fields, submit, switch) = match mode {
                AuthMode::SignIn => (
                    "email, password",
                    "Sign in",
                    "New here? toggle to create an account",
                ),
                AuthMode::Register => (
                    "name, email, password, confirm",
                    "Register",
                    "Already have an account? toggle to sign in",
                ),
            };
            let status = if busy { " (waiting for server...)" } else { "" };
            format!("Divina Mujer: {mode}{status}\n  fields: {fields}\n  submit: {submit}\n  {switch}")
        }
        Screen::Protected { display_name } => {
            format!("Welcome {display_name}\n  protected view active\n  signout")
        }
    }
}

/// Prints notices above the next rendered screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Error => println!("! {}", notice.message),
            NoticeKind::Success => println!("* {}", notice.message),
        }
    }
}

/// Execute the shell action.
/// # Errors
/// Returns an error if the HTTP client cannot be built or stdin fails.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        crate::GIT_COMMIT_HASH
    );
    info!("Authentication service: {}", args.gateway.base_url);

    let gateway = Arc::new(HttpGateway::new(args.gateway).context("failed to build HTTP client")?);
    let mut controller = AuthFlowController::new(args.flow, gateway, TerminalNotifier);
    let mut in_flight: JoinSet<FlowEvent> = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&controller.screen(), controller.state().is_busy()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    debug!("stdin closed");
                    break;
                };

                match parse_input(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Event(input)) => {
                        if let Some(request) = controller.dispatch(input.into()) {
                            let gateway = Arc::clone(controller.gateway());
                            in_flight.spawn(async move { request.perform(&gateway).await });
                        }
                    }
                    Err(message) => {
                        if !message.is_empty() {
                            println!("{message}");
                        }
                        continue;
                    }
                }
            }
            Some(joined) = in_flight.join_next() => {
                match joined {
                    Ok(completion) => {
                        controller.dispatch(completion);
                    }
                    Err(e) => error!("Request task failed: {}", e),
                }
            }
        }

        println!("{}", render(&controller.screen(), controller.state().is_busy()));
    }

    in_flight.abort_all();

    Ok(())
}
