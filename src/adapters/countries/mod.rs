//! Country dataset adapter. GraphQL over reqwest.

pub mod graphql;

pub use graphql::GraphqlCountries;
