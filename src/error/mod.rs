use thiserror::Error;

use crate::api::{ApiError, ApiErrorKind};

/// One violated form rule, keyed by the document field it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failures collected before any network call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message reported for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn without(mut self, field: &str) -> Self {
        self.0.retain(|e| e.field != field);
        self
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum SiteError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Storage(String),

    #[error("live query failed: {0}")]
    Subscription(String),

    #[error("{0}")]
    Auth(String),

    #[error("Your admin session has expired. Please sign in again.")]
    Unauthorized,

    #[error("document {id} is malformed: {reason}")]
    Decode { id: String, reason: String },
}

impl SiteError {
    pub fn write(e: ApiError) -> Self {
        Self::classify(e, Self::Write)
    }

    pub fn storage(e: ApiError) -> Self {
        Self::classify(e, Self::Storage)
    }

    pub fn subscription(e: ApiError) -> Self {
        Self::classify(e, Self::Subscription)
    }

    pub fn auth(e: ApiError) -> Self {
        Self::Auth(describe_auth_failure(&e.message))
    }

    fn classify(e: ApiError, wrap: fn(String) -> Self) -> Self {
        if e.kind == ApiErrorKind::Unauthorized {
            Self::Unauthorized
        } else {
            wrap(e.message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Identity provider error codes are SCREAMING_CASE; map the common ones.
fn describe_auth_failure(message: &str) -> String {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
            "Invalid email or password.".to_string()
        }
        "USER_DISABLED" => "This account has been disabled.".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many failed attempts. Try again later.".to_string()
        }
        _ => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(kind: ApiErrorKind, message: &str) -> ApiError {
        ApiError {
            kind,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_validation_errors_lookup_and_without() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Name must be at least 2 characters.");
        errors.push("email", "Please enter a valid email address.");

        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters."));
        assert_eq!(errors.len(), 2);

        let rest = errors.without("name");
        assert!(rest.get("name").is_none());
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_validation_errors_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push("title", "Title is required.");
        errors.push("link", "Link must be a valid URL.");
        assert_eq!(
            errors.to_string(),
            "Title is required. Link must be a valid URL."
        );
    }

    #[test]
    fn test_unauthorized_api_error_becomes_unauthorized() {
        let e = SiteError::write(api_error(ApiErrorKind::Unauthorized, "Unauthorized"));
        assert!(e.is_unauthorized());
    }

    #[test]
    fn test_write_error_keeps_backend_message() {
        let e = SiteError::write(api_error(
            ApiErrorKind::Http,
            "Missing or insufficient permissions. (403 Forbidden)",
        ));
        assert_eq!(
            e,
            SiteError::Write("Missing or insufficient permissions. (403 Forbidden)".to_string())
        );
    }

    #[test]
    fn test_auth_error_codes_are_described() {
        let e = SiteError::auth(api_error(
            ApiErrorKind::Http,
            "INVALID_LOGIN_CREDENTIALS (400 Bad Request)",
        ));
        assert_eq!(e.to_string(), "Invalid email or password.");

        let e = SiteError::auth(api_error(ApiErrorKind::Network, "failed to fetch"));
        assert_eq!(e.to_string(), "failed to fetch");
    }
}
