pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{GroqClient, PropertyPortalClient};
pub use config::CliConfig;
pub use core::pipeline::SuggestionPipeline;
pub use utils::error::{ChatbotError, Result};
