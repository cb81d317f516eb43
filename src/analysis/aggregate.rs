// src/analysis/aggregate.rs
use super::classifier::EntityClassifier;
use crate::itjobs::Job;
use crate::utils::{format_posted_date, offer_url, remote_glyph, DATE_SENTINEL};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// One presentational row of the offers table. Derived, discarded after
/// render.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub title: String,
    pub company: String,
    pub link: String,
    pub date_posted: String,
    pub allow_remote: String,
}

/// Result of one aggregation pass over a job list.
///
/// Holds the five distributions the dashboard charts, the remote/onsite
/// split, and one row per job in input order. Invariants: the company
/// counts sum to `total`, and `remote_count + non_remote_count == total`.
#[derive(Debug, Default, Serialize)]
pub struct JobAggregation {
    pub total: usize,
    pub company_counts: HashMap<String, u32>,
    pub location_distribution: HashMap<String, u32>,
    pub tech_distribution: HashMap<String, u32>,
    pub role_distribution: HashMap<String, u32>,
    pub remote_count: u32,
    pub non_remote_count: u32,
    pub rows: Vec<DisplayRow>,
}

impl JobAggregation {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Companies ordered by offer count, most offers first. Ties break on
    /// name so the table is stable between passes.
    pub fn sorted_company_counts(&self) -> Vec<(String, u32)> {
        let mut counts: Vec<(String, u32)> = self
            .company_counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

fn bump(map: &mut HashMap<String, u32>, key: &str) {
    *map.entry(key.to_string()).or_insert(0) += 1;
}

/// Fold the fetched jobs into a fresh [`JobAggregation`] in input order.
///
/// Classification runs once per title; a classifier failure degrades that
/// title to empty buckets and the pass continues, so the company and
/// remote tallies never depend on the NER endpoint being reachable.
pub async fn aggregate_jobs(jobs: &[Job], classifier: &dyn EntityClassifier) -> JobAggregation {
    let mut agg = JobAggregation {
        total: jobs.len(),
        ..Default::default()
    };

    for job in jobs {
        let buckets = match classifier.classify(&job.title).await {
            Ok(buckets) => buckets,
            Err(e) => {
                warn!("Classification failed for {:?}: {:#}", job.title, e);
                Default::default()
            }
        };

        for role in &buckets.roles {
            bump(&mut agg.role_distribution, role);
        }
        for tech in &buckets.technologies {
            bump(&mut agg.tech_distribution, tech);
        }
        for location in &job.locations {
            bump(&mut agg.location_distribution, &location.name);
        }
        bump(&mut agg.company_counts, &job.company.name);

        if job.allow_remote {
            agg.remote_count += 1;
        } else {
            agg.non_remote_count += 1;
        }

        agg.rows.push(DisplayRow {
            title: job.title.clone(),
            company: job.company.name.clone(),
            link: offer_url(job.id),
            date_posted: format_posted_date(job.updated_at.as_deref().unwrap_or(DATE_SENTINEL)),
            allow_remote: remote_glyph(job.allow_remote).to_string(),
        });
    }

    agg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::EntityBuckets;
    use crate::itjobs::{Company, JobLocation};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Returns canned buckets per title; unknown titles classify empty.
    struct CannedClassifier {
        by_title: HashMap<String, EntityBuckets>,
    }

    #[async_trait]
    impl EntityClassifier for CannedClassifier {
        async fn classify(&self, text: &str) -> Result<EntityBuckets> {
            Ok(self.by_title.get(text).cloned().unwrap_or_default())
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl EntityClassifier for BrokenClassifier {
        async fn classify(&self, _text: &str) -> Result<EntityBuckets> {
            anyhow::bail!("inference endpoint unreachable")
        }
    }

    fn buckets(techs: &[&str], roles: &[&str]) -> EntityBuckets {
        EntityBuckets {
            technologies: techs.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            roles: roles.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
        }
    }

    fn job(
        id: u64,
        title: &str,
        company: &str,
        locations: &[&str],
        remote: bool,
        updated: Option<&str>,
    ) -> Job {
        Job {
            id,
            title: title.to_string(),
            company: Company {
                name: company.to_string(),
            },
            locations: locations
                .iter()
                .enumerate()
                .map(|(i, name)| JobLocation {
                    id: i as u32 + 1,
                    name: name.to_string(),
                })
                .collect(),
            allow_remote: remote,
            updated_at: updated.map(|s| s.to_string()),
        }
    }

    fn fixture_jobs() -> Vec<Job> {
        vec![
            job(
                1,
                "Senior Rust Developer",
                "Acme",
                &["Lisboa"],
                true,
                Some("2024-03-15 10:30:00"),
            ),
            job(2, "Rust Engineer", "Acme", &["Lisboa"], true, None),
            job(3, "QA Analyst", "Beta", &[], false, Some("not a date")),
        ]
    }

    fn fixture_classifier() -> CannedClassifier {
        let mut by_title = HashMap::new();
        by_title.insert(
            "Senior Rust Developer".to_string(),
            buckets(&["Rust"], &["Developer"]),
        );
        by_title.insert("Rust Engineer".to_string(), buckets(&["Rust"], &["Engineer"]));
        CannedClassifier { by_title }
    }

    #[tokio::test]
    async fn test_remote_split_partitions_the_job_list() {
        let jobs = fixture_jobs();
        let agg = aggregate_jobs(&jobs, &fixture_classifier()).await;

        assert_eq!(agg.remote_count, 2);
        assert_eq!(agg.non_remote_count, 1);
        assert_eq!(
            agg.remote_count + agg.non_remote_count,
            jobs.len() as u32
        );
    }

    #[tokio::test]
    async fn test_company_counts_sum_to_total() {
        let jobs = fixture_jobs();
        let agg = aggregate_jobs(&jobs, &fixture_classifier()).await;

        let sum: u32 = agg.company_counts.values().sum();
        assert_eq!(sum, jobs.len() as u32);
        assert_eq!(agg.company_counts["Acme"], 2);
        assert_eq!(agg.company_counts["Beta"], 1);
    }

    #[tokio::test]
    async fn test_location_distribution_sums_to_location_entries() {
        let jobs = fixture_jobs();
        let agg = aggregate_jobs(&jobs, &fixture_classifier()).await;

        let entries: usize = jobs.iter().map(|j| j.locations.len()).sum();
        let sum: u32 = agg.location_distribution.values().sum();
        assert_eq!(sum as usize, entries);
        assert_eq!(agg.location_distribution["Lisboa"], 2);
    }

    #[tokio::test]
    async fn test_entity_distributions_count_per_title() {
        let agg = aggregate_jobs(&fixture_jobs(), &fixture_classifier()).await;

        // "Rust" appears in two titles, once each after in-title dedup.
        assert_eq!(agg.tech_distribution["Rust"], 2);
        assert_eq!(agg.role_distribution["Developer"], 1);
        assert_eq!(agg.role_distribution["Engineer"], 1);
    }

    #[tokio::test]
    async fn test_display_rows_follow_input_order() {
        let agg = aggregate_jobs(&fixture_jobs(), &fixture_classifier()).await;

        assert_eq!(agg.rows.len(), 3);
        assert_eq!(agg.rows[0].title, "Senior Rust Developer");
        assert_eq!(agg.rows[0].date_posted, "15-03-2024");
        assert_eq!(agg.rows[0].allow_remote, "✅");
        assert_eq!(agg.rows[0].link, "https://www.itjobs.pt/oferta/1");
        assert_eq!(agg.rows[1].date_posted, "N/A");
        assert_eq!(agg.rows[2].date_posted, "N/A");
        assert_eq!(agg.rows[2].allow_remote, "❌");
    }

    #[tokio::test]
    async fn test_classifier_failure_degrades_to_empty_buckets() {
        let jobs = fixture_jobs();
        let agg = aggregate_jobs(&jobs, &BrokenClassifier).await;

        assert!(agg.tech_distribution.is_empty());
        assert!(agg.role_distribution.is_empty());
        // The non-NER tallies are unaffected.
        assert_eq!(agg.remote_count + agg.non_remote_count, jobs.len() as u32);
        assert_eq!(agg.company_counts.values().sum::<u32>(), jobs.len() as u32);
    }

    #[tokio::test]
    async fn test_sorted_company_counts_descends_by_count() {
        let agg = aggregate_jobs(&fixture_jobs(), &fixture_classifier()).await;
        let sorted = agg.sorted_company_counts();

        assert_eq!(sorted[0], ("Acme".to_string(), 2));
        assert_eq!(sorted[1], ("Beta".to_string(), 1));
    }

    #[tokio::test]
    async fn test_empty_job_list_yields_empty_aggregation() {
        let agg = aggregate_jobs(&[], &fixture_classifier()).await;

        assert!(agg.is_empty());
        assert_eq!(agg.remote_count + agg.non_remote_count, 0);
        assert!(agg.rows.is_empty());
    }
}
