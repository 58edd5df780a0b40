//! Country catalog use case: fetch the full list once per browse, then apply
//! client-side filtering and sorting (the API does no server-side filtering).

use crate::domain::{Country, DomainError, SortConfig, filter_countries, sort_countries};
use crate::ports::CountryGateway;
use std::sync::Arc;
use tracing::info;

pub struct CatalogService {
    countries: Arc<dyn CountryGateway>,
}

impl CatalogService {
    pub fn new(countries: Arc<dyn CountryGateway>) -> Self {
        Self { countries }
    }

    /// Fetch the full list, filter by `query`, sort by `config`.
    pub async fn browse(
        &self,
        query: &str,
        config: SortConfig,
    ) -> Result<Vec<Country>, DomainError> {
        let all = self.countries.list_countries().await?;
        let mut matched = filter_countries(&all, query);
        sort_countries(&mut matched, config);
        info!(
            total = all.len(),
            matched = matched.len(),
            query,
            "catalog browse"
        );
        Ok(matched)
    }

    /// Detail snapshot for one country code.
    pub async fn detail(&self, code: &str) -> Result<Country, DomainError> {
        self.countries.country_detail(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Continent, SortField, SortOrder};

    struct StubGateway {
        countries: Vec<Country>,
    }

    #[async_trait::async_trait]
    impl CountryGateway for StubGateway {
        async fn list_countries(&self) -> Result<Vec<Country>, DomainError> {
            Ok(self.countries.clone())
        }

        async fn country_detail(&self, code: &str) -> Result<Country, DomainError> {
            self.countries
                .iter()
                .find(|c| c.code == code)
                .cloned()
                .ok_or_else(|| DomainError::Countries(format!("unknown code {code}")))
        }
    }

    fn country(code: &str, name: &str, continent: &str) -> Country {
        Country {
            code: code.into(),
            name: name.into(),
            native: None,
            phone: None,
            capital: None,
            currency: None,
            emoji: "🏳".into(),
            continent: Continent {
                code: continent.into(),
                name: continent.into(),
            },
            languages: Vec::new(),
            states: Vec::new(),
        }
    }

    fn catalog() -> CatalogService {
        CatalogService::new(Arc::new(StubGateway {
            countries: vec![country("A", "Alpha", "X"), country("B", "Beta", "Y")],
        }))
    }

    #[tokio::test]
    async fn browse_applies_filter_and_sort() {
        let catalog = catalog();

        let hits = catalog.browse("alpha", SortConfig::default()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "A");

        let all = catalog
            .browse(
                "",
                SortConfig {
                    field: SortField::Name,
                    order: SortOrder::Descending,
                },
            )
            .await
            .unwrap();
        let codes: Vec<&str> = all.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["B", "A"]);
    }

    #[tokio::test]
    async fn detail_propagates_gateway_errors() {
        let catalog = catalog();
        assert!(catalog.detail("A").await.is_ok());
        assert!(matches!(
            catalog.detail("ZZ").await,
            Err(DomainError::Countries(_))
        ));
    }
}
