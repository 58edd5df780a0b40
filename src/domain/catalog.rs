//! Client-side catalog rules: substring filtering and stable sorting.
//!
//! The countries API returns the full list; filtering and sorting happen
//! locally, as pure functions, so they are unit-testable without I/O.

use crate::domain::Country;

/// Field the country list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Capital,
    Continent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            order: SortOrder::Ascending,
        }
    }
}

/// Case-insensitive substring filter over name, continent name, capital,
/// currency, and language names. The empty query matches everything.
pub fn filter_countries(countries: &[Country], query: &str) -> Vec<Country> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return countries.to_vec();
    }
    countries
        .iter()
        .filter(|c| matches_query(c, &needle))
        .cloned()
        .collect()
}

fn matches_query(country: &Country, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&country.name)
        || contains(&country.continent.name)
        || country.capital.as_deref().is_some_and(contains)
        || country.currency.as_deref().is_some_and(contains)
        || country.languages.iter().any(|l| contains(&l.name))
}

/// Stable in-place sort. Missing capitals compare as the empty string, so
/// they group at the start of an ascending sort rather than being dropped.
pub fn sort_countries(countries: &mut [Country], config: SortConfig) {
    countries.sort_by(|a, b| {
        let ord = match config.field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Capital => a
                .capital
                .as_deref()
                .unwrap_or("")
                .cmp(b.capital.as_deref().unwrap_or("")),
            SortField::Continent => a.continent.name.cmp(&b.continent.name),
        };
        match config.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}
