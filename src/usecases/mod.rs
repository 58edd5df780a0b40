//! Application use cases. Orchestrate domain logic via ports.

pub mod catalog_service;
pub mod chat_service;
pub mod session_service;

pub use catalog_service::CatalogService;
pub use chat_service::{ChatService, SendOutcome, WELCOME_TEXT};
pub use session_service::{SessionService, SessionState};
