use crate::core::{CityDirectory, CityExtraction, CityExtractor, PipelineOutcome, ProjectSource};

/// Sequences the three upstream calls: extract a city candidate, resolve it
/// to an identifier, fetch projects for it. Each stage runs exactly once per
/// request; every failure degrades into a pass-through message instead of an
/// error.
pub struct SuggestionPipeline<E, D, P> {
    extractor: E,
    directory: D,
    projects: P,
}

impl<E, D, P> SuggestionPipeline<E, D, P>
where
    E: CityExtractor,
    D: CityDirectory,
    P: ProjectSource,
{
    pub fn new(extractor: E, directory: D, projects: P) -> Self {
        Self {
            extractor,
            directory,
            projects,
        }
    }

    pub async fn run(&self, query: &str) -> PipelineOutcome {
        match self.extractor.extract_city(query).await {
            CityExtraction::Found(city) => {
                tracing::info!(%city, "extracted city candidate");
                match self.directory.resolve_city(&city).await {
                    Some(city_id) => {
                        tracing::info!(%city_id, "city resolved, fetching projects");
                        PipelineOutcome::Fetched(self.projects.fetch_projects(&city_id).await)
                    }
                    None => {
                        tracing::warn!(%city, "city candidate did not resolve");
                        PipelineOutcome::PassThrough(city)
                    }
                }
            }
            // The resolver could never match the sentinel or an error text,
            // so both skip straight to the fallback path.
            CityExtraction::NotFound(reply) => {
                tracing::info!("no city found in query");
                PipelineOutcome::PassThrough(reply)
            }
            CityExtraction::TransportError(detail) => {
                tracing::warn!(%detail, "extraction degraded to error text");
                PipelineOutcome::PassThrough(detail)
            }
        }
    }
}
