use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// A start URL entry for scraper input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartUrl {
    pub url: String,
}

/// Proxy settings passed to an actor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyConfig {
    #[serde(rename = "useApifyProxy")]
    pub use_apify_proxy: bool,
    #[serde(rename = "apifyProxyGroups")]
    pub apify_proxy_groups: Vec<String>,
}

impl ProxyConfig {
    /// Route actor traffic through the platform's residential pool.
    pub fn residential() -> Self {
        Self {
            use_apify_proxy: true,
            apify_proxy_groups: vec!["RESIDENTIAL".to_string()],
        }
    }
}

/// Input for the trudax/reddit-scraper actor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedditScraperInput {
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
    pub sort: String,
    #[serde(rename = "type")]
    pub search_type: String,
    #[serde(rename = "maxItems")]
    pub max_items: u32,
    #[serde(rename = "maxComments")]
    pub max_comments: u32,
    #[serde(rename = "maxCommunitiesCount")]
    pub max_communities_count: u32,
    #[serde(rename = "maxUserCount")]
    pub max_user_count: u32,
    #[serde(rename = "scrollTimeout")]
    pub scroll_timeout: u32,
    pub time: String,
    pub proxy: ProxyConfig,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Where a run stands, derived from the platform's status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Succeeded,
    Failed,
    InProgress,
}

impl RunData {
    pub fn state(&self) -> RunState {
        match self.status.as_str() {
            "SUCCEEDED" => RunState::Succeeded,
            "FAILED" | "ABORTED" | "TIMED-OUT" => RunState::Failed,
            _ => RunState::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reddit_input_uses_actor_field_names() {
        let input = RedditScraperInput {
            start_urls: vec![StartUrl {
                url: "https://www.reddit.com/search/?q=rust".into(),
            }],
            sort: "new".into(),
            search_type: "posts".into(),
            max_items: 10,
            max_comments: 5,
            max_communities_count: 2,
            max_user_count: 2,
            scroll_timeout: 40,
            time: "week".into(),
            proxy: ProxyConfig::residential(),
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["startUrls"][0]["url"], "https://www.reddit.com/search/?q=rust");
        assert_eq!(json["type"], "posts");
        assert_eq!(json["maxItems"], 10);
        assert_eq!(json["maxCommunitiesCount"], 2);
        assert_eq!(json["scrollTimeout"], 40);
        assert_eq!(json["proxy"]["useApifyProxy"], true);
        assert_eq!(json["proxy"]["apifyProxyGroups"][0], "RESIDENTIAL");
    }

    #[test]
    fn run_state_from_status() {
        let run: RunData = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "status": "TIMED-OUT",
            "defaultDatasetId": "d1",
        }))
        .unwrap();
        assert_eq!(run.state(), RunState::Failed);
        assert!(run.started_at.is_none());

        let running = RunData {
            status: "RUNNING".into(),
            ..run.clone()
        };
        assert_eq!(running.state(), RunState::InProgress);

        let done = RunData {
            status: "SUCCEEDED".into(),
            ..run
        };
        assert_eq!(done.state(), RunState::Succeeded);
    }
}
