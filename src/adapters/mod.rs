//! Infrastructure adapters. Implement outbound ports.
//!
//! GraphQL countries API, chat completions, Google OAuth, token file, TUI.
//! Map infrastructure errors to DomainError.

pub mod assistant;
pub mod auth;
pub mod countries;
pub mod persistence;
pub mod ui;
