//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod catalog;
pub mod entities;
pub mod errors;

pub use catalog::{SortConfig, SortField, SortOrder, filter_countries, sort_countries};
pub use entities::{ChatMessage, Continent, Country, CountryState, Language, User};
pub use errors::DomainError;
