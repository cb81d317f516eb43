// src/lib.rs
pub mod analysis;
pub mod environment;
pub mod export;
pub mod itjobs;
pub mod utils;
pub mod web;

pub use analysis::{aggregate_jobs, EntityClassifier, JobAggregation, NerClassifier};
pub use environment::{AppConfig, Secrets};
pub use itjobs::ItJobsClient;
pub use web::start_web_server;
