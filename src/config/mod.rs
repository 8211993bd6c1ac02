use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ChatbotError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "propgpt")]
#[command(about = "Chat front-end that turns free-text queries into property project suggestions")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, default_value = "https://api.groq.com/openai/v1")]
    pub llm_api_url: String,

    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub llm_api_key: String,

    #[arg(long, default_value = "llama-3.1-8b-instant")]
    pub llm_model: String,

    #[arg(long, default_value = "https://www.magicbricks.com")]
    pub portal_base_url: String,

    #[arg(long, default_value = "15")]
    pub request_timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn llm_api_url(&self) -> &str {
        &self.llm_api_url
    }

    fn llm_api_key(&self) -> &str {
        &self.llm_api_key
    }

    fn llm_model(&self) -> &str {
        &self.llm_model
    }

    fn portal_base_url(&self) -> &str {
        &self.portal_base_url
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("llm_api_url", &self.llm_api_url)?;
        validate_url("portal_base_url", &self.portal_base_url)?;
        if self.llm_api_key.trim().is_empty() {
            return Err(ChatbotError::MissingConfigError {
                field: "llm_api_key".to_string(),
            });
        }
        validate_non_empty_string("llm_model", &self.llm_model)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 120)?;
        Ok(())
    }
}
