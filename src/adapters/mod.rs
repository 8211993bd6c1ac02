// Adapters layer: concrete clients for the external systems (hosted LLM,
// property portal).

pub mod groq;
pub mod portal;

pub use groq::GroqClient;
pub use portal::PropertyPortalClient;
