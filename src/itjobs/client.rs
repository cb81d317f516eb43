// src/itjobs/client.rs
use super::types::{Job, JobListResponse, LocationInfo, LocationListResponse};
use crate::environment::AppConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

/// The upstream API rejects default client user agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Job offers with this state flag are live on the board.
const STATE_ACTIVE: &str = "1";

/// Source of one page of job offers. The paging loop in [`collect_pages`]
/// only depends on this seam, so tests can drive it with canned pages.
#[async_trait]
pub trait JobPageSource {
    async fn job_page(&self, page: u32, location: Option<u32>) -> Result<Vec<Job>>;
}

pub struct ItJobsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    page_limit: u32,
    max_pages: u32,
}

impl ItJobsClient {
    pub fn new(config: &AppConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            api_key,
            page_limit: config.page_limit,
            max_pages: config.max_pages,
        })
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("API_KEY not set; export it or add it to .env")
    }

    /// Fetch the location catalogue used for the dashboard filter.
    pub async fn fetch_locations(&self) -> Result<Vec<LocationInfo>> {
        let url = format!("{}/location/list.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.key()?)])
            .send()
            .await
            .context("Failed to fetch location list")?;

        if !response.status().is_success() {
            anyhow::bail!("Location list request failed: HTTP {}", response.status());
        }

        let parsed: LocationListResponse = response
            .json()
            .await
            .context("Failed to parse location list response")?;

        info!("Fetched {} locations", parsed.results.len());
        Ok(parsed.results)
    }

    /// Fetch every active job offer, optionally filtered by location code.
    /// Failures mid-paging degrade to the pages collected so far.
    pub async fn fetch_all_jobs(&self, location: Option<u32>) -> Vec<Job> {
        collect_pages(self, location, self.max_pages).await
    }
}

#[async_trait]
impl JobPageSource for ItJobsClient {
    async fn job_page(&self, page: u32, location: Option<u32>) -> Result<Vec<Job>> {
        let url = format!("{}/job/list.json", self.base_url);
        let query = job_page_query(self.key()?, self.page_limit, page, location);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("Failed to fetch job page {}", page))?;

        if !response.status().is_success() {
            anyhow::bail!("Job list request failed: HTTP {}", response.status());
        }

        let parsed: JobListResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse job page {}", page))?;

        Ok(parsed.results)
    }
}

/// Query parameters for one job page. The `location` parameter is only sent
/// when a filter is selected.
fn job_page_query(
    api_key: &str,
    limit: u32,
    page: u32,
    location: Option<u32>,
) -> Vec<(String, String)> {
    let mut query = vec![
        ("api_key".to_string(), api_key.to_string()),
        ("limit".to_string(), limit.to_string()),
        ("page".to_string(), page.to_string()),
        ("state".to_string(), STATE_ACTIVE.to_string()),
    ];

    if let Some(code) = location {
        query.push(("location".to_string(), code.to_string()));
    }

    query
}

/// Page through a [`JobPageSource`] starting at page 1, concatenating results
/// until an empty page, an error, or the page cap. Errors stop paging but the
/// pages already collected are still returned.
pub async fn collect_pages<S>(source: &S, location: Option<u32>, max_pages: u32) -> Vec<Job>
where
    S: JobPageSource + Sync,
{
    let mut all_jobs = Vec::new();
    let mut page = 1;

    loop {
        if page > max_pages {
            warn!(
                "Stopping after {} pages (cap reached); results may be partial",
                max_pages
            );
            break;
        }

        match source.job_page(page, location).await {
            Ok(jobs) if jobs.is_empty() => break,
            Ok(jobs) => {
                all_jobs.extend(jobs);
                page += 1;
            }
            Err(e) => {
                warn!("Job page {} failed, returning partial results: {:#}", page, e);
                break;
            }
        }
    }

    info!("Fetched {} job offer(s) over {} page(s)", all_jobs.len(), page - 1);
    all_jobs
}
