pub mod pipeline;

pub use crate::domain::model::{
    CityExtraction, CityId, PipelineOutcome, ProjectCard, ResponseEnvelope,
};
pub use crate::domain::ports::{CityDirectory, CityExtractor, ConfigProvider, ProjectSource};
pub use crate::utils::error::Result;
