//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("country API error: {0}")]
    Countries(String),

    #[error("assistant error: {0}")]
    Assistant(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("token store error: {0}")]
    TokenStore(String),

    #[error("input error: {0}")]
    Input(String),
}
