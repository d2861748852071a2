//! Local checks run before any credential leaves the device. Registration drafts
//! are checked against a fixed, ordered rule set; sign-in only requires both
//! fields to be present. Duplicate accounts are detected by the service, not here.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::LazyLock};
use thiserror::Error;

/// Minimum password length accepted when creating an account.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_NAME_REQUIRED: &str = "name is required";
pub const MSG_INVALID_EMAIL: &str = "invalid email";
pub const MSG_PASSWORD_MISMATCH: &str = "passwords do not match";
pub const MSG_SIGN_IN_REQUIRED: &str = "enter email and password";

// Host labels start alphanumeric; the TLD is at least two letters.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_'+\-]+\.)*[A-Za-z0-9_'+\-]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .ok()
});

/// Form fields captured while the auth screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm_password",
        };
        f.write_str(name)
    }
}

/// Draft credentials as typed by the user. Password fields are secrets and are
/// redacted from `Debug` output.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Credentials {
    /// Replaces the value of a single field.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = SecretString::from(value),
            Field::ConfirmPassword => self.confirm_password = SecretString::from(value),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn clear_passwords(&mut self) {
        self.password = SecretString::default();
        self.confirm_password = SecretString::default();
    }
}

/// A problem attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Violations in rule precedence order. Never empty; the first entry is the one
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    first: FieldError,
    rest: Vec<FieldError>,
}

impl ValidationErrors {
    fn from_vec(mut errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let first = errors.remove(0);
        Some(Self {
            first,
            rest: errors,
        })
    }

    #[must_use]
    pub fn first(&self) -> &FieldError {
        &self.first
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.first.fmt(f)
    }
}

impl std::error::Error for ValidationErrors {}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|regex| regex.is_match(email))
}

#[must_use]
pub fn password_too_short(min_len: usize) -> String {
    format!("password must be at least {min_len} characters")
}

/// Registration rules with a configurable minimum password length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub min_password_len: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_password_len: MIN_PASSWORD_LEN,
        }
    }
}

impl Rules {
    /// Checks a registration draft. Field rules are reported in order (name,
    /// email, password length); the confirmation check only runs once those
    /// pass, so a mismatch is never reported alongside another problem.
    ///
    /// # Errors
    /// Returns the ordered list of violated rules.
    pub fn validate_registration(&self, draft: &Credentials) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if draft.name.is_empty() {
            errors.push(FieldError::new(Field::Name, MSG_NAME_REQUIRED));
        }

        if !valid_email(&draft.email) {
            errors.push(FieldError::new(Field::Email, MSG_INVALID_EMAIL));
        }

        let password = draft.password.expose_secret();
        if password.encode_utf16().count() < self.min_password_len {
            errors.push(FieldError::new(
                Field::Password,
                password_too_short(self.min_password_len),
            ));
        }

        if errors.is_empty() && password != draft.confirm_password.expose_secret() {
            errors.push(FieldError::new(
                Field::ConfirmPassword,
                MSG_PASSWORD_MISMATCH,
            ));
        }

        ValidationErrors::from_vec(errors).map_or(Ok(()), Err)
    }
}

/// Checks a registration draft with the default rules.
///
/// # Errors
/// Returns the ordered list of violated rules.
pub fn validate_registration(draft: &Credentials) -> Result<(), ValidationErrors> {
    Rules::default().validate_registration(draft)
}

/// Sign-in only needs both fields to be present.
///
/// # Errors
/// Returns a single generic error naming the first missing field.
pub fn validate_sign_in(email: &str, password: &SecretString) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::new(Field::Email, MSG_SIGN_IN_REQUIRED));
    }
    if password.expose_secret().is_empty() {
        return Err(FieldError::new(Field::Password, MSG_SIGN_IN_REQUIRED));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, password: &str, confirm: &str) -> Credentials {
        Credentials {
            name: name.to_string(),
            email: email.to_string(),
            password: SecretString::from(password.to_string()),
            confirm_password: SecretString::from(confirm.to_string()),
        }
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("ana.maria+shop@x.co"));
        assert!(!valid_email(""));
        assert!(!valid_email("ana"));
        assert!(!valid_email("ana@x"));
        assert!(!valid_email("ana @x.com"));
        assert!(!valid_email("@x.com"));
        assert!(!valid_email("ana@x.c"));
        assert!(!valid_email("ana@x..com"));
        assert!(!valid_email(".ana@x.com"));
        assert!(!valid_email("ana..maria@x.com"));
        assert!(!valid_email("ana.@x.com"));
        assert!(!valid_email("ana@x.com."));
        assert!(!valid_email("ana@-x.com"));
        assert!(!valid_email("ana@x.c0m"));
        assert!(valid_email("o'neil@mail.example.org"));
        assert!(valid_email("ANA_1@X-Y.COM"));
    }

    #[test]
    fn test_valid_draft_passes() {
        let draft = draft("Ana", "ana@x.com", "abcdef", "abcdef");
        assert!(validate_registration(&draft).is_ok());
    }

    #[test]
    fn test_missing_name_is_reported_first() {
        let draft = draft("", "a@b.com", "123456", "123456");
        let errors = validate_registration(&draft).unwrap_err();
        assert_eq!(errors.iter().count(), 1);
        assert_eq!(errors.first().field, Field::Name);
        assert_eq!(errors.to_string(), MSG_NAME_REQUIRED);
    }

    #[test]
    fn test_rules_are_reported_in_precedence_order() {
        let draft = draft("", "nope", "123", "456");
        let errors = validate_registration(&draft).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Password]);
        assert_eq!(errors.first().message, MSG_NAME_REQUIRED);
    }

    #[test]
    fn test_short_password() {
        let draft = draft("Ana", "ana@x.com", "abcde", "abcde");
        let errors = validate_registration(&draft).unwrap_err();
        assert_eq!(errors.first().field, Field::Password);
        assert_eq!(
            errors.first().message,
            "password must be at least 6 characters"
        );
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        let draft = draft("Ana", "ana@x.com", "ñññññ", "ñññññ");
        assert!(validate_registration(&draft).is_err());

        let draft = draft_with("ññññññ");
        assert!(validate_registration(&draft).is_ok());

        // Each emoji is a surrogate pair, so three of them reach the minimum.
        assert!(validate_registration(&draft_with("😀😀😀")).is_ok());
        assert!(validate_registration(&draft_with("😀😀a")).is_err());
    }

    fn draft_with(password: &str) -> Credentials {
        draft("Ana", "ana@x.com", password, password)
    }

    #[test]
    fn test_mismatch_is_attributed_to_confirmation() {
        let draft = draft("Ana", "ana@x.com", "abcdef", "abcdeg");
        let errors = validate_registration(&draft).unwrap_err();
        assert_eq!(errors.iter().count(), 1);
        assert_eq!(errors.first().field, Field::ConfirmPassword);
        assert_eq!(errors.first().message, MSG_PASSWORD_MISMATCH);
    }

    #[test]
    fn test_mismatch_not_reported_with_other_errors() {
        let draft = draft("", "ana@x.com", "abcdef", "zzzzzz");
        let errors = validate_registration(&draft).unwrap_err();
        assert!(errors.iter().all(|e| e.field != Field::ConfirmPassword));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let draft = draft("", "bad", "1", "2");
        assert_eq!(validate_registration(&draft), validate_registration(&draft));
    }

    #[test]
    fn test_custom_min_password_len() {
        let rules = Rules {
            min_password_len: 12,
        };
        let errors = rules
            .validate_registration(&draft_with("abcdef"))
            .unwrap_err();
        assert_eq!(
            errors.first().message,
            "password must be at least 12 characters"
        );
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let empty = SecretString::default();
        let secret = SecretString::from("secret1".to_string());

        let err = validate_sign_in("", &secret).unwrap_err();
        assert_eq!(err.field, Field::Email);
        assert_eq!(err.message, MSG_SIGN_IN_REQUIRED);

        let err = validate_sign_in("u@x.com", &empty).unwrap_err();
        assert_eq!(err.field, Field::Password);

        assert!(validate_sign_in("u@x.com", &secret).is_ok());
    }

    #[test]
    fn test_credentials_set_and_clear() {
        let mut creds = Credentials::default();
        creds.set(Field::Name, "Ana".to_string());
        creds.set(Field::Password, "abcdef".to_string());
        creds.set(Field::ConfirmPassword, "abcdef".to_string());
        assert_eq!(creds.name, "Ana");
        assert_eq!(creds.password.expose_secret(), "abcdef");

        creds.clear_passwords();
        assert_eq!(creds.name, "Ana");
        assert_eq!(creds.password.expose_secret(), "");
        assert_eq!(creds.confirm_password.expose_secret(), "");

        creds.clear();
        assert!(creds.name.is_empty());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let creds = draft("Ana", "ana@x.com", "hunter22", "hunter22");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("hunter22"));
    }
}
