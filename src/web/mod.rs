// src/web/mod.rs
pub mod handlers;
pub mod render;
pub mod types;

pub use types::*;

use crate::analysis::{EntityClassifier, JobAggregation, NerClassifier};
use crate::environment::{AppConfig, Secrets};
use crate::itjobs::{ItJobsClient, LocationInfo};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, routes, Request, Response, State};
use std::sync::Arc;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/?<location>")]
pub async fn dashboard(location: Option<u32>, state: &State<ServerState>) -> RawHtml<String> {
    handlers::dashboard_handler(location, state).await
}

#[get("/locations")]
pub async fn get_locations(
    state: &State<ServerState>,
) -> Result<Json<DataResponse<Vec<LocationInfo>>>, Json<StandardErrorResponse>> {
    handlers::locations_handler(state).await
}

#[get("/analysis?<location>")]
pub async fn get_analysis(
    location: Option<u32>,
    state: &State<ServerState>,
) -> Json<DataResponse<JobAggregation>> {
    handlers::analysis_handler(location, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
    ))
}

// Main server start function
pub async fn start_web_server(config: AppConfig, secrets: Secrets, port: u16) -> Result<()> {
    let client = ItJobsClient::new(&config, secrets.api_key)?;
    let classifier: Arc<dyn EntityClassifier> = Arc::new(NerClassifier::new(
        config.ner_base_url.clone(),
        config.ner_model.clone(),
        secrets.ner_api_token,
        config.timeout_seconds,
    )?);

    let state = ServerState { client, classifier };

    info!("Starting job market dashboard on http://0.0.0.0:{}", port);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, internal_error])
        .mount("/", routes![dashboard])
        .mount(
            "/api",
            routes![get_locations, get_analysis, health, options],
        )
        .launch()
        .await;

    Ok(())
}
