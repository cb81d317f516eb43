// src/itjobs/types.rs
use serde::{Deserialize, Serialize};

/// One job offer as returned by the itjobs.pt listing API.
///
/// Only the fields the dashboard consumes are modeled; the upstream payload
/// carries more and serde ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub title: String,
    pub company: Company,
    #[serde(default)]
    pub locations: Vec<JobLocation>,
    #[serde(rename = "allowRemote", default)]
    pub allow_remote: bool,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// Location entry attached to a job offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLocation {
    pub id: u32,
    pub name: String,
}

/// Entry of the location catalogue (`/location/list.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInfo {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JobListResponse {
    #[serde(default)]
    pub results: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub struct LocationListResponse {
    #[serde(default)]
    pub results: Vec<LocationInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserializes_upstream_shape() {
        let raw = r#"{
            "id": 501234,
            "title": "Senior Rust Developer",
            "company": {"name": "Acme Software"},
            "locations": [{"id": 18, "name": "Porto"}],
            "allowRemote": true,
            "updatedAt": "2024-03-15 10:30:00",
            "wage": null
        }"#;

        let job: Job = serde_json::from_str(raw).unwrap();
        assert_eq!(job.id, 501234);
        assert_eq!(job.company.name, "Acme Software");
        assert_eq!(job.locations.len(), 1);
        assert!(job.allow_remote);
        assert_eq!(job.updated_at.as_deref(), Some("2024-03-15 10:30:00"));
    }

    #[test]
    fn test_job_tolerates_missing_optional_fields() {
        let raw = r#"{
            "id": 7,
            "title": "QA Engineer",
            "company": {"name": "Beta Lda"}
        }"#;

        let job: Job = serde_json::from_str(raw).unwrap();
        assert!(job.locations.is_empty());
        assert!(!job.allow_remote);
        assert!(job.updated_at.is_none());
    }
}
