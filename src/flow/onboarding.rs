//! Step counter gating the introductory pages. Completion is monotonic: once the
//! counter reaches the page count it never goes back.

/// Page titles, indexed by step.
pub const ONBOARDING_TITLES: [&str; 3] = [
    "Welcome to Divina Mujer",
    "Fashion designed for you",
    "Sign up and start now",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingState {
    step: u32,
    steps: u32,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_ONBOARDING_STEPS)
    }
}

impl OnboardingState {
    #[must_use]
    pub const fn new(steps: u32) -> Self {
        Self { step: 0, steps }
    }

    /// Same page count, already finished.
    #[must_use]
    pub const fn completed(self) -> Self {
        Self {
            step: self.steps,
            steps: self.steps,
        }
    }

    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Moves to the next page. Saturates at the page count.
    pub fn advance(&mut self) {
        if !self.is_complete() {
            self.step += 1;
        }
    }

    /// Jumps straight to the auth form.
    pub fn skip(&mut self) {
        self.step = self.steps;
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.step >= self.steps
    }

    /// Title of the current page, if there is one.
    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        if self.is_complete() {
            return None;
        }
        usize::try_from(self.step)
            .ok()
            .and_then(|step| ONBOARDING_TITLES.get(step).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_saturates() {
        for advances in 0..8 {
            let mut onboarding = OnboardingState::default();
            for _ in 0..advances {
                onboarding.advance();
            }
            assert_eq!(onboarding.step(), advances.min(3));
            assert_eq!(onboarding.is_complete(), advances >= 3);
        }
    }

    #[test]
    fn test_skip_completes_from_any_step() {
        for start in 0..4 {
            let mut onboarding = OnboardingState::default();
            for _ in 0..start {
                onboarding.advance();
            }
            onboarding.skip();
            assert_eq!(onboarding.step(), 3);
            assert!(onboarding.is_complete());
        }
    }

    #[test]
    fn test_titles() {
        let mut onboarding = OnboardingState::default();
        assert_eq!(onboarding.title(), Some("Welcome to Divina Mujer"));
        onboarding.advance();
        assert_eq!(onboarding.title(), Some("Fashion designed for you"));
        onboarding.advance();
        assert_eq!(onboarding.title(), Some("Sign up and start now"));
        onboarding.advance();
        assert_eq!(onboarding.title(), None);
    }

    #[test]
    fn test_zero_steps_is_complete() {
        assert!(OnboardingState::new(0).is_complete());
    }
}
