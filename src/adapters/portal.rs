use crate::domain::model::CityId;
use crate::domain::ports::{CityDirectory, ConfigProvider, ProjectSource};
use crate::utils::agent::UserAgentPool;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Client for the property portal's two public JSON endpoints: city
/// autosuggest and suggested projects. Both share the same header and
/// timeout discipline; both degrade every failure to absence.
#[derive(Clone)]
pub struct PropertyPortalClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    agents: Arc<UserAgentPool>,
}

#[derive(Deserialize)]
struct AutoSuggestResponse {
    #[serde(rename = "locationMap", default)]
    location_map: LocationMap,
}

#[derive(Deserialize, Default)]
struct LocationMap {
    #[serde(rename = "LOCATION", default)]
    locations: Vec<LocationEntry>,
}

#[derive(Deserialize)]
struct LocationEntry {
    #[serde(default)]
    result: String,
    // The portal sends city codes as strings or numbers depending on entry.
    city: Option<serde_json::Value>,
}

fn identifier_from_value(value: &serde_json::Value) -> Option<CityId> {
    match value {
        serde_json::Value::String(s) => Some(CityId::new(s.clone())),
        serde_json::Value::Number(n) => Some(CityId::new(n.to_string())),
        _ => None,
    }
}

impl PropertyPortalClient {
    pub fn new(config: &impl ConfigProvider) -> Self {
        Self {
            http: Client::new(),
            base_url: config.portal_base_url().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs()),
            agents: Arc::new(UserAgentPool::new()),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.agents.next_agent()));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        if let Ok(referer) = HeaderValue::from_str(&format!("{}/", self.base_url)) {
            headers.insert(REFERER, referer);
        }
        headers
    }

    async fn lookup_city(&self, candidate: &str) -> Result<Option<CityId>> {
        let url = format!("{}/mbutility/homepageAutoSuggest", self.base_url);
        tracing::debug!(%url, candidate, "autosuggest request");

        let response = self
            .http
            .get(&url)
            .headers(self.headers())
            .query(&[("searchtxt", candidate)])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(status = %response.status(), "autosuggest response");

        let data: AutoSuggestResponse = response.json().await?;
        for location in &data.location_map.locations {
            if location.result == candidate {
                return Ok(location.city.as_ref().and_then(identifier_from_value));
            }
        }
        Ok(None)
    }

    async fn suggested_projects(&self, city: &CityId) -> Result<serde_json::Value> {
        let url = format!("{}/mbsrp/suggestedProjectData", self.base_url);
        tracing::debug!(%url, %city, "suggested projects request");

        let response = self
            .http
            .get(&url)
            .headers(self.headers())
            .query(&[
                ("locid", "undefined"),
                ("cityId", city.as_str()),
                ("budgetMin", ""),
                ("budgetMax", ""),
                ("mainSrp", "Y"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(status = %response.status(), "suggested projects response");

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CityDirectory for PropertyPortalClient {
    async fn resolve_city(&self, candidate: &str) -> Option<CityId> {
        match self.lookup_city(candidate).await {
            Ok(Some(city_id)) => Some(city_id),
            Ok(None) => {
                tracing::warn!(candidate, "no matching city in autosuggest response");
                None
            }
            Err(e) => {
                tracing::error!("city lookup failed: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ProjectSource for PropertyPortalClient {
    async fn fetch_projects(&self, city: &CityId) -> Option<serde_json::Value> {
        match self.suggested_projects(city).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::error!("project fetch failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        portal_base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn llm_api_url(&self) -> &str {
            "https://api.groq.com/openai/v1"
        }

        fn llm_api_key(&self) -> &str {
            "test-key"
        }

        fn llm_model(&self) -> &str {
            "llama-3.1-8b-instant"
        }

        fn portal_base_url(&self) -> &str {
            &self.portal_base_url
        }

        fn request_timeout_secs(&self) -> u64 {
            15
        }
    }

    fn client(server: &MockServer) -> PropertyPortalClient {
        PropertyPortalClient::new(&MockConfig {
            portal_base_url: server.base_url(),
        })
    }

    #[tokio::test]
    async fn test_resolve_city_exact_match() {
        let server = MockServer::start();
        let suggest_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/mbutility/homepageAutoSuggest")
                .query_param("searchtxt", "Pune")
                .header("X-Requested-With", "XMLHttpRequest");
            then.status(200).json_body(serde_json::json!({
                "locationMap": {
                    "LOCATION": [
                        {"result": "Pune East", "city": "PUN02"},
                        {"result": "Pune", "city": "PUN01"}
                    ]
                }
            }));
        });

        let city_id = client(&server).resolve_city("Pune").await;

        suggest_mock.assert();
        assert_eq!(city_id, Some(CityId::new("PUN01")));
    }

    #[tokio::test]
    async fn test_resolve_city_accepts_numeric_identifier() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbutility/homepageAutoSuggest");
            then.status(200).json_body(serde_json::json!({
                "locationMap": {"LOCATION": [{"result": "Pune", "city": 4320}]}
            }));
        });

        let city_id = client(&server).resolve_city("Pune").await;

        assert_eq!(city_id, Some(CityId::new("4320")));
    }

    #[tokio::test]
    async fn test_resolve_city_no_exact_match() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbutility/homepageAutoSuggest");
            then.status(200).json_body(serde_json::json!({
                "locationMap": {"LOCATION": [{"result": "Pune East", "city": "PUN02"}]}
            }));
        });

        let city_id = client(&server).resolve_city("Pune").await;

        assert_eq!(city_id, None);
    }

    #[tokio::test]
    async fn test_resolve_city_degrades_on_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbutility/homepageAutoSuggest");
            then.status(503);
        });

        assert_eq!(client(&server).resolve_city("Pune").await, None);
    }

    #[tokio::test]
    async fn test_resolve_city_degrades_on_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbutility/homepageAutoSuggest");
            then.status(200).body("not json at all");
        });

        assert_eq!(client(&server).resolve_city("Pune").await, None);
    }

    #[tokio::test]
    async fn test_resolve_city_handles_empty_body_shape() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbutility/homepageAutoSuggest");
            then.status(200).json_body(serde_json::json!({}));
        });

        assert_eq!(client(&server).resolve_city("Pune").await, None);
    }

    #[tokio::test]
    async fn test_fetch_projects_returns_raw_payload() {
        let server = MockServer::start();
        let payload = serde_json::json!({
            "projectsCards": [{"lmtDName": "Skyline", "minPriceDesc": "50L"}]
        });
        let projects_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/mbsrp/suggestedProjectData")
                .query_param("cityId", "PUN01")
                .query_param("mainSrp", "Y");
            then.status(200).json_body(payload.clone());
        });

        let result = client(&server).fetch_projects(&CityId::new("PUN01")).await;

        projects_mock.assert();
        assert_eq!(result, Some(payload));
    }

    #[tokio::test]
    async fn test_fetch_projects_degrades_on_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mbsrp/suggestedProjectData");
            then.status(500);
        });

        let result = client(&server).fetch_projects(&CityId::new("PUN01")).await;

        assert_eq!(result, None);
    }
}
