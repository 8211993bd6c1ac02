pub mod agent;
pub mod error;
pub mod logger;
pub mod validation;
