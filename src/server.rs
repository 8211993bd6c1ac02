use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::core::pipeline::SuggestionPipeline;
use crate::domain::model::{PipelineOutcome, ProjectCard, ResponseEnvelope};
use crate::domain::ports::{CityDirectory, CityExtractor, ProjectSource};
use crate::utils::error::Result;

pub const EMPTY_QUERY_MESSAGE: &str =
    "Please provide a query with price or location to get property suggestions.";

/// Hard cap on the number of project cards returned to the UI.
const MAX_PROPERTIES: usize = 2;

pub struct AppState<E, D, P> {
    pub pipeline: SuggestionPipeline<E, D, P>,
}

pub fn router<E, D, P>(state: Arc<AppState<E, D, P>>) -> Router
where
    E: CityExtractor + 'static,
    D: CityDirectory + 'static,
    P: ProjectSource + 'static,
{
    Router::new()
        .route("/", get(chat_page))
        .route("/chatbot/", post(chatbot::<E, D, P>))
        .with_state(state)
        // The chat widget may be embedded anywhere
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

#[derive(Debug, Deserialize)]
struct ChatParams {
    query: Option<String>,
}

async fn chatbot<E, D, P>(
    State(state): State<Arc<AppState<E, D, P>>>,
    Query(params): Query<ChatParams>,
) -> Json<ResponseEnvelope>
where
    E: CityExtractor,
    D: CityDirectory,
    P: ProjectSource,
{
    let query = params.query.unwrap_or_default();
    if query.is_empty() {
        return Json(ResponseEnvelope::message(EMPTY_QUERY_MESSAGE));
    }

    info!(%query, "received chatbot query");

    // The chat contract never surfaces a hard failure: anything that escapes
    // the degrade-to-absent handling still becomes a benign 200 message.
    match respond(&state, &query).await {
        Ok(envelope) => Json(envelope),
        Err(e) => {
            error!("chatbot request failed: {}", e);
            Json(ResponseEnvelope::message(format!("An error occurred: {}", e)))
        }
    }
}

async fn respond<E, D, P>(state: &AppState<E, D, P>, query: &str) -> Result<ResponseEnvelope>
where
    E: CityExtractor,
    D: CityDirectory,
    P: ProjectSource,
{
    let outcome = state.pipeline.run(query).await;
    Ok(shape_response(outcome))
}

fn shape_response(outcome: PipelineOutcome) -> ResponseEnvelope {
    match outcome {
        PipelineOutcome::Fetched(Some(payload)) => {
            match payload.get("projectsCards").and_then(|v| v.as_array()) {
                Some(cards) => ResponseEnvelope::with_properties(
                    cards
                        .iter()
                        .take(MAX_PROPERTIES)
                        .map(ProjectCard::from_value)
                        .collect(),
                ),
                None => ResponseEnvelope::message(payload.to_string()),
            }
        }
        PipelineOutcome::Fetched(None) => {
            ResponseEnvelope::message(serde_json::Value::Null.to_string())
        }
        PipelineOutcome::PassThrough(text) => ResponseEnvelope::message(text),
    }
}

const CHAT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>PropGPT</title>
  <style>
    body { font-family: sans-serif; max-width: 640px; margin: 2rem auto; }
    #log { border: 1px solid #ccc; padding: 1rem; min-height: 240px; }
    .card { border: 1px solid #ddd; margin: 0.5rem 0; padding: 0.5rem; }
    .card img { max-width: 120px; display: block; }
  </style>
</head>
<body>
  <h1>PropGPT</h1>
  <div id="log"></div>
  <form id="chat">
    <input id="query" placeholder="Show me flats in Pune" size="40">
    <button type="submit">Send</button>
  </form>
  <script>
    const log = document.getElementById('log');
    document.getElementById('chat').addEventListener('submit', async (e) => {
      e.preventDefault();
      const query = document.getElementById('query').value;
      const res = await fetch('/chatbot/?query=' + encodeURIComponent(query), { method: 'POST' });
      const data = await res.json();
      if (data.message) {
        log.insertAdjacentHTML('beforeend', '<p></p>');
        log.lastElementChild.textContent = data.message;
      }
      for (const p of data.properties) {
        const card = document.createElement('div');
        card.className = 'card';
        card.textContent = p.lmtDName + ' — ' + p.minPriceDesc + ' to ' + p.maxPriceDesc;
        if (p.imageUrl) {
          const img = document.createElement('img');
          img.src = p.imageUrl;
          card.appendChild(img);
        }
        log.appendChild(card);
      }
    });
  </script>
</body>
</html>
"#;
