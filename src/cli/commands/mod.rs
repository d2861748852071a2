pub mod logging;

use crate::gateway::DEFAULT_BASE_URL;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_SKIP_ONBOARDING: &str = "skip-onboarding";
pub const ARG_NO_VALIDATION: &str = "no-validation";
pub const ARG_CLEAR_ON_TOGGLE: &str = "clear-on-toggle";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("divina")
        .about("Divina Mujer storefront sign-in")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long("api-url")
                .help("Authentication service base URL, example: http://localhost:5000")
                .default_value(DEFAULT_BASE_URL)
                .env("DIVINA_API_URL"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds (default: wait indefinitely)")
                .env("DIVINA_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_SKIP_ONBOARDING)
                .long("skip-onboarding")
                .help("Start on the sign-in form")
                .env("DIVINA_SKIP_ONBOARDING")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_NO_VALIDATION)
                .long("no-validation")
                .help("Send registrations without local checks")
                .env("DIVINA_NO_VALIDATION")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_CLEAR_ON_TOGGLE)
                .long("clear-on-toggle")
                .help("Clear typed fields when switching between sign-in and create account")
                .env("DIVINA_CLEAR_ON_TOGGLE")
                .action(ArgAction::SetTrue),
        );

    logging::with_args(command)
}
