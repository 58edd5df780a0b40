//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Country, DomainError, User};

/// Country catalog gateway. Two read-only queries, no mutations.
#[async_trait::async_trait]
pub trait CountryGateway: Send + Sync {
    /// Fetch the full country list (list-level fields only).
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError>;

    /// Fetch one country by its unique code, including detail-only fields
    /// (native name, phone prefix, states).
    async fn country_detail(&self, code: &str) -> Result<Country, DomainError>;
}

/// Travel assistant completion endpoint.
#[async_trait::async_trait]
pub trait AssistantPort: Send + Sync {
    /// Generate one reply for the latest user utterance. Prior turns are not
    /// resent; `country_context` is the optional "currently viewed country"
    /// label that biases the response.
    async fn generate_reply(
        &self,
        prompt: &str,
        country_context: Option<&str>,
    ) -> Result<String, DomainError>;
}

/// OAuth provider. Sign-in flow, bearer-token validation, remote revocation.
#[async_trait::async_trait]
pub trait AuthPort: Send + Sync {
    /// Run the interactive OAuth flow to completion. Returns the identity
    /// with its access token on success.
    async fn sign_in(&self) -> Result<User, DomainError>;

    /// Validate a persisted token against the identity endpoint.
    async fn validate(&self, token: &str) -> Result<User, DomainError>;

    /// Revoke the token at the provider.
    async fn revoke(&self, token: &str) -> Result<(), DomainError>;
}

/// Persisted session token. A single string under a fixed storage key.
#[async_trait::async_trait]
pub trait TokenStorePort: Send + Sync {
    /// Load the persisted token, if any. A missing or unreadable store
    /// counts as "no token".
    async fn load(&self) -> Result<Option<String>, DomainError>;

    /// Persist the token, replacing any previous one.
    async fn save(&self, token: &str) -> Result<(), DomainError>;

    /// Remove the persisted token.
    async fn clear(&self) -> Result<(), DomainError>;
}
