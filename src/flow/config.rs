use crate::{flow::onboarding::OnboardingState, validation::Rules};

/// Number of introductory pages shown before the auth form.
pub const DEFAULT_ONBOARDING_STEPS: u32 = 3;

/// What happens to the typed fields when the user switches between sign-in
/// and account creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftPolicy {
    #[default]
    Preserve,
    ClearOnToggle,
}

/// Feature switches for the flow. The defaults reproduce the full storefront
/// screen; turning features off yields the lighter variant without onboarding
/// or local registration checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    pub onboarding_enabled: bool,
    pub onboarding_steps: u32,
    pub validate_registration: bool,
    pub rules: Rules,
    pub draft_policy: DraftPolicy,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            onboarding_enabled: true,
            onboarding_steps: DEFAULT_ONBOARDING_STEPS,
            validate_registration: true,
            rules: Rules::default(),
            draft_policy: DraftPolicy::default(),
        }
    }
}

impl FlowConfig {
    /// Onboarding state at process start.
    #[must_use]
    pub fn initial_onboarding(&self) -> OnboardingState {
        let onboarding = OnboardingState::new(self.onboarding_steps);

        if self.onboarding_enabled {
            onboarding
        } else {
            onboarding.completed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FlowConfig::default();
        assert!(config.onboarding_enabled);
        assert!(config.validate_registration);
        assert_eq!(config.onboarding_steps, 3);
        assert_eq!(config.rules.min_password_len, 6);
        assert_eq!(config.draft_policy, DraftPolicy::Preserve);
        assert_eq!(config.initial_onboarding().step(), 0);
    }

    #[test]
    fn test_disabled_onboarding_starts_complete() {
        let config = FlowConfig {
            onboarding_enabled: false,
            ..FlowConfig::default()
        };
        assert!(config.initial_onboarding().is_complete());
    }
}
