// src/web/handlers.rs
use crate::analysis::{aggregate_jobs, JobAggregation};
use crate::itjobs::LocationInfo;
use crate::web::render::render_dashboard;
use crate::web::types::{DataResponse, ServerState, StandardErrorResponse};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

/// One full dashboard pass: resolve locations, fetch jobs, aggregate, render.
/// Upstream failures degrade to empty data plus a visible warning banner.
pub async fn dashboard_handler(
    location: Option<u32>,
    state: &State<ServerState>,
) -> RawHtml<String> {
    let (locations, warning) = match state.client.fetch_locations().await {
        Ok(locations) => (locations, None),
        Err(e) => {
            error!("Location list unavailable: {:#}", e);
            (Vec::new(), Some(format!("Failed to fetch locations: {e}")))
        }
    };

    let jobs = state.client.fetch_all_jobs(location).await;
    info!(
        "Dashboard pass: {} job(s), location filter: {:?}",
        jobs.len(),
        location
    );

    let aggregation = aggregate_jobs(&jobs, state.classifier.as_ref()).await;
    RawHtml(render_dashboard(
        &locations,
        location,
        &aggregation,
        warning.as_deref(),
    ))
}

pub async fn locations_handler(
    state: &State<ServerState>,
) -> Result<Json<DataResponse<Vec<LocationInfo>>>, Json<StandardErrorResponse>> {
    match state.client.fetch_locations().await {
        Ok(locations) => Ok(Json(DataResponse::new(locations))),
        Err(e) => {
            error!("Location list unavailable: {:#}", e);
            Err(Json(StandardErrorResponse::new(
                format!("Failed to fetch locations: {e}"),
                "UPSTREAM_ERROR".to_string(),
            )))
        }
    }
}

pub async fn analysis_handler(
    location: Option<u32>,
    state: &State<ServerState>,
) -> Json<DataResponse<JobAggregation>> {
    let jobs = state.client.fetch_all_jobs(location).await;
    let aggregation = aggregate_jobs(&jobs, state.classifier.as_ref()).await;
    Json(DataResponse::new(aggregation))
}

pub async fn health_handler() -> Json<&'static str> {
    Json("OK")
}
