// src/web/types.rs
use crate::analysis::EntityClassifier;
use crate::itjobs::ItJobsClient;
use rocket::serde::Serialize;
use std::sync::Arc;

/// Immutable handles shared across requests. Each render pass allocates its
/// own aggregation state; nothing here is mutated after startup.
pub struct ServerState {
    pub client: ItJobsClient,
    pub classifier: Arc<dyn EntityClassifier>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String) -> Self {
        Self {
            success: false,
            error,
            error_code,
        }
    }
}
