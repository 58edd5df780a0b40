//! Implements CountryGateway against a GraphQL endpoint.
//!
//! Two fixed read-only queries. Responses decode through a typed envelope;
//! GraphQL-level errors and missing data are rejected at the boundary instead
//! of trusting field presence.

use crate::domain::{Country, DomainError};
use crate::ports::CountryGateway;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{info, warn};

/// Full list; detail-only fields (native, phone, states) are not requested.
const GET_COUNTRIES: &str = "\
query GetCountries {
  countries {
    code
    name
    emoji
    capital
    currency
    languages { code name native rtl }
    continent { code name }
  }
}";

/// Single country by code, including detail-only fields.
const GET_COUNTRY_DETAIL: &str = "\
query GetCountry($code: ID!) {
  country(code: $code) {
    code
    name
    native
    phone
    capital
    currency
    emoji
    continent { name code }
    languages { code name native rtl }
    states { code name }
  }
}";

/// GraphQL response envelope. Either `data` or `errors` is present.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CountriesData {
    countries: Vec<Country>,
}

#[derive(Deserialize)]
struct CountryData {
    /// Null when the code does not exist.
    country: Option<Country>,
}

/// GraphQL client for the public countries dataset.
pub struct GraphqlCountries {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphqlCountries {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| DomainError::Countries(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "countries API returned error");
            return Err(DomainError::Countries(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Countries(format!("failed to read response: {}", e)))?;
        decode(&body)
    }
}

/// Decode a GraphQL response body, rejecting malformed payloads and
/// GraphQL-level errors.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DomainError> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| DomainError::Countries(format!("malformed response: {}", e)))?;

    if let Some(first) = envelope.errors.first() {
        return Err(DomainError::Countries(format!(
            "GraphQL error: {}",
            first.message
        )));
    }
    envelope
        .data
        .ok_or_else(|| DomainError::Countries("response carried no data".into()))
}

#[async_trait::async_trait]
impl CountryGateway for GraphqlCountries {
    async fn list_countries(&self) -> Result<Vec<Country>, DomainError> {
        let data: CountriesData = self.execute(GET_COUNTRIES, json!({})).await?;
        info!(count = data.countries.len(), "fetched country list");
        Ok(data.countries)
    }

    async fn country_detail(&self, code: &str) -> Result<Country, DomainError> {
        let data: CountryData = self
            .execute(GET_COUNTRY_DETAIL, json!({ "code": code }))
            .await?;
        data.country
            .ok_or_else(|| DomainError::Countries(format!("no country with code {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_country_list() {
        let body = r#"{
            "data": {
                "countries": [
                    {
                        "code": "JP",
                        "name": "Japan",
                        "emoji": "🇯🇵",
                        "capital": "Tokyo",
                        "currency": "JPY",
                        "languages": [
                            {"code": "ja", "name": "Japanese", "native": "日本語"}
                        ],
                        "continent": {"code": "AS", "name": "Asia"}
                    }
                ]
            }
        }"#;
        let data: CountriesData = decode(body).unwrap();
        assert_eq!(data.countries.len(), 1);
        let japan = &data.countries[0];
        assert_eq!(japan.code, "JP");
        assert_eq!(japan.capital.as_deref(), Some("Tokyo"));
        assert!(!japan.languages[0].rtl); // rtl omitted -> false
        assert!(japan.states.is_empty()); // not in the list query
    }

    #[test]
    fn decode_detail_with_states_and_phone() {
        let body = r#"{
            "data": {
                "country": {
                    "code": "US",
                    "name": "United States",
                    "native": "United States",
                    "phone": "1",
                    "capital": "Washington D.C.",
                    "currency": "USD,USN,USS",
                    "emoji": "🇺🇸",
                    "continent": {"name": "North America", "code": "NA"},
                    "languages": [
                        {"code": "en", "name": "English", "native": "English", "rtl": false}
                    ],
                    "states": [
                        {"code": "CA", "name": "California"},
                        {"code": null, "name": "Guam"}
                    ]
                }
            }
        }"#;
        let data: CountryData = decode(body).unwrap();
        let us = data.country.unwrap();
        assert_eq!(us.phone.as_deref(), Some("1"));
        assert_eq!(us.states.len(), 2);
        assert_eq!(us.states[1].code, None);
    }

    #[test]
    fn decode_unknown_code_yields_null_country() {
        let body = r#"{"data": {"country": null}}"#;
        let data: CountryData = decode(body).unwrap();
        assert!(data.country.is_none());
    }

    #[test]
    fn decode_rejects_graphql_errors() {
        let body = r#"{"data": null, "errors": [{"message": "bad query"}]}"#;
        let err = decode::<CountriesData>(body).unwrap_err();
        assert!(matches!(err, DomainError::Countries(msg) if msg.contains("bad query")));
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        assert!(decode::<CountriesData>("not json").is_err());
        // Missing required field `name`
        let body = r#"{"data": {"countries": [{"code": "JP"}]}}"#;
        assert!(decode::<CountriesData>(body).is_err());
        // No data, no errors
        assert!(decode::<CountriesData>("{}").is_err());
    }
}
