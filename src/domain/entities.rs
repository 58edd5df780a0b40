//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/GraphQL types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};

/// A country snapshot from the catalog. `code` is the unique key.
///
/// The list query omits `native`/`phone`/`states`; those default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub native: Option<String>,
    /// International dialing prefix, e.g. "81".
    #[serde(default)]
    pub phone: Option<String>,
    pub capital: Option<String>,
    pub currency: Option<String>,
    pub emoji: String,
    pub continent: Continent,
    pub languages: Vec<Language>,
    #[serde(default)]
    pub states: Vec<CountryState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Continent {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub native: String,
    /// Right-to-left script.
    #[serde(default)]
    pub rtl: bool,
}

/// Administrative subdivision. Named to avoid clashing with session state enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryState {
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
}

/// One entry in the chat transcript.
///
/// Ids are timestamp-derived milliseconds, strictly increasing within a
/// session (the welcome message is id 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    pub from_user: bool,
}

/// Authenticated Google user. Replaced wholesale on login/logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub access_token: String,
}
