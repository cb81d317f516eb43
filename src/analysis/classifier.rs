// src/analysis/classifier.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Technology and role candidates extracted from one job title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityBuckets {
    pub technologies: HashSet<String>,
    pub roles: HashSet<String>,
}

/// Capability seam for title classification, so the remote NER model can be
/// swapped or mocked in tests.
#[async_trait]
pub trait EntityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<EntityBuckets>;
}

/// One tagged span as returned by the NER inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerEntity {
    #[serde(alias = "entity_group")]
    pub entity: String,
    pub word: String,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Classifier backed by a hosted token-classification model.
pub struct NerClassifier {
    client: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl NerClassifier {
    pub fn new(
        base_url: String,
        model: String,
        api_token: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        info!("Using NER model: {}", model);
        Ok(Self {
            client,
            base_url,
            model,
            api_token,
        })
    }
}

#[async_trait]
impl EntityClassifier for NerClassifier {
    async fn classify(&self, text: &str) -> Result<EntityBuckets> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let mut request = self.client.post(&url).json(&InferenceRequest { inputs: text });

        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .context("Failed to reach NER inference endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("NER inference returned error {}: {}", status, body);
        }

        let entities: Vec<NerEntity> = response
            .json()
            .await
            .context("Failed to parse NER inference response")?;

        Ok(partition_entities(&entities))
    }
}

/// Sort tagged spans into technology and role buckets.
///
/// Organizations and tech stacks tend to come back tagged MISC or ORG, and
/// job roles occasionally as PER, so that is how the buckets are filled.
/// Known limitation: this label mapping is a crude stand-in for a model
/// trained on job titles, and it is kept as-is deliberately.
pub fn partition_entities(entities: &[NerEntity]) -> EntityBuckets {
    let mut buckets = EntityBuckets::default();

    for entity in entities {
        if entity.entity.contains("MISC") || entity.entity.contains("ORG") {
            buckets.technologies.insert(entity.word.clone());
        } else if entity.entity.contains("PER") {
            buckets.roles.insert(entity.word.clone());
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(label: &str, word: &str) -> NerEntity {
        NerEntity {
            entity: label.to_string(),
            word: word.to_string(),
        }
    }

    #[test]
    fn test_misc_and_org_labels_become_technologies() {
        let buckets = partition_entities(&[
            entity("B-MISC", "Rust"),
            entity("I-ORG", "Kubernetes"),
        ]);

        assert!(buckets.technologies.contains("Rust"));
        assert!(buckets.technologies.contains("Kubernetes"));
        assert!(buckets.roles.is_empty());
    }

    #[test]
    fn test_per_labels_become_roles() {
        let buckets = partition_entities(&[entity("B-PER", "Engineer")]);

        assert!(buckets.roles.contains("Engineer"));
        assert!(buckets.technologies.is_empty());
    }

    #[test]
    fn test_unmatched_labels_are_dropped() {
        let buckets = partition_entities(&[entity("B-LOC", "Lisboa"), entity("O", "the")]);

        assert!(buckets.technologies.is_empty());
        assert!(buckets.roles.is_empty());
    }

    #[test]
    fn test_one_entity_lands_in_exactly_one_bucket() {
        // A label matching both patterns goes to technologies; the role
        // branch is only reached when the first check fails.
        let buckets = partition_entities(&[entity("MISC-PER", "Java")]);

        assert!(buckets.technologies.contains("Java"));
        assert!(!buckets.roles.contains("Java"));
    }

    #[test]
    fn test_repeated_words_deduplicate_within_a_title() {
        let buckets = partition_entities(&[
            entity("B-MISC", "Python"),
            entity("I-MISC", "Python"),
        ]);

        assert_eq!(buckets.technologies.len(), 1);
    }

    #[test]
    fn test_entity_group_alias_parses() {
        let raw = r#"[{"entity_group": "MISC", "word": "React"}]"#;
        let entities: Vec<NerEntity> = serde_json::from_str(raw).unwrap();
        assert_eq!(entities[0].entity, "MISC");
    }
}
