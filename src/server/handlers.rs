use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Serialize;

use crate::legend::LegendControl;
use crate::render::PlotSummary;
use crate::surface::LeafletMap;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub summary: PlotSummary,
}

pub async fn index_html(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

// API endpoint with the full map description
pub async fn get_map(State(state): State<AppState>) -> Json<LeafletMap> {
    Json(state.rendered.map.clone())
}

pub async fn get_legend(State(state): State<AppState>) -> Result<Json<LegendControl>, StatusCode> {
    state
        .rendered
        .map
        .legend()
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        summary: state.rendered.summary,
    })
}
