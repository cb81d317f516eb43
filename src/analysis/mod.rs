// src/analysis/mod.rs
pub mod aggregate;
pub mod classifier;

pub use aggregate::{aggregate_jobs, DisplayRow, JobAggregation};
pub use classifier::{partition_entities, EntityBuckets, EntityClassifier, NerClassifier};
