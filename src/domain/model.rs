use serde::{Deserialize, Serialize};

/// Phrase the extractor is instructed to emit when the query names no city.
pub const NO_CITY_SENTINEL: &str = "City not found in the query";

/// Opaque city token issued by the portal's autosuggest endpoint. Only ever
/// constructed from upstream values, never fabricated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityId(String);

impl CityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of the city-extraction call. The variants carry the model's text
/// so every fallback path can surface it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityExtraction {
    /// The model replied with a city candidate.
    Found(String),
    /// The model's reply contains the no-city sentinel; kept verbatim.
    NotFound(String),
    /// The call itself failed; carries the descriptive error text.
    TransportError(String),
}

/// Final result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// A city resolved; the project fetch either produced a raw payload or
    /// degraded to absent.
    Fetched(Option<serde_json::Value>),
    /// No project data; the text flows straight into the response message.
    PassThrough(String),
}

/// The four-field projection of an upstream project record shown to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    #[serde(rename = "lmtDName", default)]
    pub name: String,

    #[serde(rename = "minPriceDesc", default)]
    pub min_price: String,

    #[serde(rename = "maxPriceDesc", default)]
    pub max_price: String,

    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

impl ProjectCard {
    /// Projects an upstream card object, defaulting any missing or non-string
    /// field to an empty string.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: field("lmtDName"),
            min_price: field("minPriceDesc"),
            max_price: field("maxPriceDesc"),
            image_url: field("imageUrl"),
        }
    }
}

/// Outward JSON contract of the chat endpoint: a message plus at most two
/// project cards. On success the message is empty; on any fallback the
/// properties are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub message: String,
    pub properties: Vec<ProjectCard>,
}

impl ResponseEnvelope {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: text.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_properties(properties: Vec<ProjectCard>) -> Self {
        Self {
            message: String::new(),
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_card_from_full_value() {
        let value = serde_json::json!({
            "lmtDName": "Skyline",
            "minPriceDesc": "50L",
            "maxPriceDesc": "80L",
            "imageUrl": "http://x/a.jpg",
            "psmid": 12345
        });

        let card = ProjectCard::from_value(&value);
        assert_eq!(card.name, "Skyline");
        assert_eq!(card.min_price, "50L");
        assert_eq!(card.max_price, "80L");
        assert_eq!(card.image_url, "http://x/a.jpg");
    }

    #[test]
    fn test_project_card_defaults_missing_fields() {
        let value = serde_json::json!({"lmtDName": "Skyline"});

        let card = ProjectCard::from_value(&value);
        assert_eq!(card.name, "Skyline");
        assert_eq!(card.min_price, "");
        assert_eq!(card.max_price, "");
        assert_eq!(card.image_url, "");
    }

    #[test]
    fn test_project_card_ignores_non_string_fields() {
        let value = serde_json::json!({"lmtDName": 42, "minPriceDesc": null});

        let card = ProjectCard::from_value(&value);
        assert_eq!(card.name, "");
        assert_eq!(card.min_price, "");
    }

    #[test]
    fn test_project_card_serializes_with_upstream_field_names() {
        let card = ProjectCard {
            name: "Skyline".to_string(),
            min_price: "50L".to_string(),
            max_price: "80L".to_string(),
            image_url: "http://x/a.jpg".to_string(),
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "lmtDName": "Skyline",
                "minPriceDesc": "50L",
                "maxPriceDesc": "80L",
                "imageUrl": "http://x/a.jpg"
            })
        );
    }

    #[test]
    fn test_envelope_constructors() {
        let fallback = ResponseEnvelope::message("no data");
        assert_eq!(fallback.message, "no data");
        assert!(fallback.properties.is_empty());

        let success = ResponseEnvelope::with_properties(vec![ProjectCard::default()]);
        assert_eq!(success.message, "");
        assert_eq!(success.properties.len(), 1);
    }
}
