use crate::domain::model::{CityExtraction, CityId};
use async_trait::async_trait;

/// Extracts a city candidate from free-text user input via a language model.
/// Implementors catch their own failures; every outcome is a tagged variant.
#[async_trait]
pub trait CityExtractor: Send + Sync {
    async fn extract_city(&self, query: &str) -> CityExtraction;
}

/// Resolves free-text city candidates to upstream city identifiers. Absence
/// covers both "no match" and "lookup failed".
#[async_trait]
pub trait CityDirectory: Send + Sync {
    async fn resolve_city(&self, candidate: &str) -> Option<CityId>;
}

/// Fetches the raw project payload for a resolved city. Absence covers any
/// transport, status, or parse failure.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects(&self, city: &CityId) -> Option<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn llm_api_url(&self) -> &str;
    fn llm_api_key(&self) -> &str;
    fn llm_model(&self) -> &str;
    fn portal_base_url(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
}
