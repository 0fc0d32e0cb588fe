//! Authentication Models
//!
//! Data structures for authentication requests, responses, and the
//! authenticated user, plus the credential validation both write
//! endpoints share.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::User;
use crate::error::FieldError;

/// Authenticated user attached to a request by the auth middleware
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a freshly registered user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: RegisteredUser,
}

/// Token issued after a successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of the authenticated user's profile
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// Credential validation shared by registration and login
pub fn validate_credentials(email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if !is_valid_email(email) {
        errors.push(FieldError {
            field: "email",
            message: "Invalid email address".to_string(),
        });
    }

    if password.len() < 8 {
        errors.push(FieldError {
            field: "password",
            message: "Password must be at least 8 characters".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials_pass() {
        assert!(validate_credentials("a@x.com", "password1").is_ok());
        assert!(validate_credentials("first.last@mail.example.org", "longenough").is_ok());
    }

    #[test]
    fn test_short_password_names_the_field() {
        let errors = validate_credentials("a@x.com", "seven77").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }

    #[test]
    fn test_bad_emails_are_rejected() {
        for email in ["", "no-at-sign", "@x.com", "a@", "a@nodot", "a b@x.com", "a@.com", "a@x.com."] {
            let errors = validate_credentials(email, "password1").unwrap_err();
            assert_eq!(errors[0].field, "email", "expected rejection for {:?}", email);
        }
    }

    #[test]
    fn test_both_fields_are_itemized() {
        let errors = validate_credentials("nope", "short").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[1].field, "password");
    }
}
