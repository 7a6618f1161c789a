use std::time::Duration;

use store::config::AuthConfig;
use store::error::{Result, StoreError};
use store::{AuthBackend, AuthGrant, User};

use super::user_id::next_user_id;
use crate::latency;

/// The one account the mock backend knows about.
pub const ACCEPTED_EMAIL: &str = "student@uom.ac.lk";
pub const ACCEPTED_PASSWORD: &str = "password123";
const ACCEPTED_ID: &str = "1";
const ACCEPTED_NAME: &str = "John Doe";

/// Opaque token handed out for every session. Not a real credential.
pub const MOCK_SESSION_TOKEN: &str = "mock_jwt_token";

/// Fixed-credential [`AuthBackend`] with simulated latency.
#[derive(Clone, Debug)]
pub struct MockAuthBackend {
    latency: Duration,
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}

impl MockAuthBackend {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            latency: config.latency(),
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl AuthBackend for MockAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AuthGrant> {
        latency::simulate(self.latency).await;

        if email != ACCEPTED_EMAIL || password != ACCEPTED_PASSWORD {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(AuthGrant {
            token: MOCK_SESSION_TOKEN.to_string(),
            user: User::new(ACCEPTED_ID, email, ACCEPTED_NAME),
        })
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthGrant> {
        latency::simulate(self.latency).await;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(StoreError::validation("All fields are required"));
        }
        tracing::debug!(email, "mock account created");
        Ok(AuthGrant {
            token: MOCK_SESSION_TOKEN.to_string(),
            user: User::new(next_user_id(), email, name),
        })
    }
}
