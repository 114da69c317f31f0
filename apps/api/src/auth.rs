//! Authentication bridge. Sign-in and sign-up are simulated against a stub
//! backend: request shapes are validated, no credential is ever verified,
//! and every account resolves to the same simulated user id.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::SupabaseConfig;

pub const SIMULATED_USER_ID: &str = "simulated-user-id";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("auth backend configuration missing")]
    NotConfigured,

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

pub struct AuthClient {
    connected: bool,
}

impl AuthClient {
    pub fn from_config(config: &SupabaseConfig) -> Self {
        let connected = config.url.is_some() && config.key.is_some();
        if !connected {
            info!("auth backend not configured; sign-in will report an error");
        }
        AuthClient { connected }
    }

    pub fn sign_up(&self, email: &str, password: &str, name: Option<&str>) -> Result<AuthUser, AuthError> {
        if !self.connected {
            return Err(AuthError::NotConfigured);
        }
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Invalid(
                "Email and password are required".to_string(),
            ));
        }
        if !email.contains('@') || password.len() < 6 {
            return Err(AuthError::Invalid(
                "Invalid email or password too short".to_string(),
            ));
        }

        Ok(AuthUser {
            id: SIMULATED_USER_ID.to_string(),
            email: email.to_string(),
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| name_from_email(email)),
        })
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if !self.connected {
            return Err(AuthError::NotConfigured);
        }

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Invalid(
                "Email and password are required".to_string(),
            ));
        }

        Ok(AuthUser {
            id: SIMULATED_USER_ID.to_string(),
            email: email.to_string(),
            name: name_from_email(email),
        })
    }

    /// Nothing server-side to tear down in the simulated backend.
    pub fn sign_out(&self) -> bool {
        true
    }

    pub fn get_user(&self, user_id: &str) -> Option<AuthUser> {
        if user_id.is_empty() {
            return None;
        }
        Some(AuthUser {
            id: user_id.to_string(),
            email: "user@example.com".to_string(),
            name: "Demo User".to_string(),
        })
    }
}

fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_client() -> AuthClient {
        AuthClient::from_config(&SupabaseConfig {
            url: Some("https://example.supabase.co".to_string()),
            key: Some("anon-key".to_string()),
        })
    }

    #[test]
    fn test_sign_in_returns_simulated_user() {
        let client = connected_client();
        let user = client.sign_in("jane@example.com", "hunter22").unwrap();
        assert_eq!(user.id, SIMULATED_USER_ID);
        assert_eq!(user.name, "jane");
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let client = connected_client();
        assert!(matches!(
            client.sign_in("", "password"),
            Err(AuthError::Invalid(_))
        ));
        assert!(matches!(
            client.sign_in("jane@example.com", ""),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn test_sign_up_validates_shape() {
        let client = connected_client();
        assert!(matches!(
            client.sign_up("not-an-email", "longenough", None),
            Err(AuthError::Invalid(_))
        ));
        assert!(matches!(
            client.sign_up("jane@example.com", "short", None),
            Err(AuthError::Invalid(_))
        ));
        assert!(client.sign_up("jane@example.com", "longenough", Some("Jane")).is_ok());
    }

    #[test]
    fn test_unconfigured_backend_reports_not_configured() {
        let client = AuthClient::from_config(&SupabaseConfig::default());
        assert!(matches!(
            client.sign_in("jane@example.com", "password"),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_get_user_simulates_lookup() {
        let client = connected_client();
        assert!(client.get_user("").is_none());
        let user = client.get_user("some-id").unwrap();
        assert_eq!(user.id, "some-id");
        assert_eq!(user.name, "Demo User");
    }
}
