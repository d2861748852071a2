use crate::{
    cli::{
        actions::{shell::Args, Action},
        commands::{
            ARG_API_URL, ARG_CLEAR_ON_TOGGLE, ARG_NO_VALIDATION, ARG_SKIP_ONBOARDING, ARG_TIMEOUT,
        },
    },
    flow::{DraftPolicy, FlowConfig},
    gateway::GatewayConfig,
};
use anyhow::{Context, Result};
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing or the service URL is invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .context("missing required argument: --api-url")?;

    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .map(|secs| Duration::from_secs(*secs));

    let gateway = GatewayConfig::parse(api_url, timeout).context("invalid DIVINA_API_URL")?;

    let draft_policy = if matches.get_flag(ARG_CLEAR_ON_TOGGLE) {
        DraftPolicy::ClearOnToggle
    } else {
        DraftPolicy::Preserve
    };

    let flow = FlowConfig {
        onboarding_enabled: !matches.get_flag(ARG_SKIP_ONBOARDING),
        validate_registration: !matches.get_flag(ARG_NO_VALIDATION),
        draft_policy,
        ..FlowConfig::default()
    };

    Ok(Action::Shell(Args { gateway, flow }))
}
