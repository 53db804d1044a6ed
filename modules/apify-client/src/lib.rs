pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{ProxyConfig, RedditScraperInput, RunData, RunState, StartUrl};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for trudax/reddit-scraper.
pub const REDDIT_SCRAPER: &str = "trudax/reddit-scraper";

/// Seconds the platform may hold each run-status request open.
const WAIT_FOR_FINISH_SECS: u32 = 60;

#[derive(Clone)]
pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(token: String, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Start a run of `actor_id` and block until it reaches a terminal state.
    pub async fn call_actor<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let run = self.start_run(actor_id, input).await?;
        tracing::info!(actor_id, run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed"
        );
        Ok(completed)
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_path(actor_id));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = Self::check(resp).await?.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!(
                "{}/actor-runs/{}?waitForFinish={}",
                self.base_url, run_id, WAIT_FOR_FINISH_SECS
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let api_resp: ApiResponse<RunData> = Self::check(resp).await?.json().await?;
            let run = api_resp.data;
            match run.state() {
                RunState::Succeeded => return Ok(run),
                RunState::Failed => {
                    return Err(ApifyError::RunFailed {
                        run_id: run.id,
                        status: run.status,
                    });
                }
                RunState::InProgress => {
                    tracing::debug!(run_id, status = %run.status, "Run still in progress");
                }
            }
        }
    }

    /// Fetch every item of a dataset in one request, exactly as the actor stored them.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let items: Vec<T> = Self::check(resp).await?.json().await?;
        tracing::info!(dataset_id, count = items.len(), "Fetched dataset items");
        Ok(items)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApifyError::from_status(status.as_u16(), body))
    }
}

/// The REST API addresses actors as `owner~name`.
fn actor_path(actor_id: &str) -> String {
    actor_id.replacen('/', "~", 1)
}
