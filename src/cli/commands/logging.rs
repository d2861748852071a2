use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order: `error` is 0, `trace` is 4.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a count (0..=5) or a level name, case-insensitive.
///
/// # Errors
/// Returns an error for anything else.
pub fn parse_log_level(level: &str) -> Result<u8, String> {
    if let Ok(count) = level.parse::<u8>() {
        return if count <= 5 {
            Ok(count)
        } else {
            Err("invalid log level".to_string())
        };
    }

    LOG_LEVELS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level.trim()))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| "invalid log level".to_string())
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("DIVINA_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_log_level)),
    )
}
