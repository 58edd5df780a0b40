//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI invokes application use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive shell: sign-in gate, then main menu
    /// (browse / chat / sign out) until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
