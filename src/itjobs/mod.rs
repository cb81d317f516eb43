// src/itjobs/mod.rs
pub mod client;
pub mod types;

pub use client::{collect_pages, ItJobsClient, JobPageSource};
pub use types::{Company, Job, JobLocation, LocationInfo};
