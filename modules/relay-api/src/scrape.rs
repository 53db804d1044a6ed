use std::sync::Arc;

use apify_client::{ApifyError, ProxyConfig, RedditScraperInput, StartUrl};
use relay_common::ScrapeRequest;
use serde_json::Value;
use tracing::{error, info};

use crate::traits::ActorRunner;

pub const REDDIT_SEARCH_URL: &str = "https://www.reddit.com/search/?q=";

// Actor tuning the caller cannot change.
pub const MAX_COMMENTS: u32 = 5;
pub const MAX_COMMUNITIES_COUNT: u32 = 2;
pub const MAX_USER_COUNT: u32 = 2;
pub const SCROLL_TIMEOUT_SECS: u32 = 40;

/// Translate a search request into reddit-scraper actor input.
///
/// The query is appended to the search URL as-is; the actor receives exactly
/// what the caller typed.
pub fn build_actor_input(req: &ScrapeRequest) -> RedditScraperInput {
    RedditScraperInput {
        start_urls: vec![StartUrl {
            url: format!("{REDDIT_SEARCH_URL}{}", req.query_string),
        }],
        sort: req.sort_by.as_str().to_string(),
        search_type: req.search_type.clone(),
        max_items: req.max_result,
        max_comments: MAX_COMMENTS,
        max_communities_count: MAX_COMMUNITIES_COUNT,
        max_user_count: MAX_USER_COUNT,
        scroll_timeout: SCROLL_TIMEOUT_SECS,
        time: req.order_by.as_str().to_string(),
        proxy: ProxyConfig::residential(),
    }
}

/// Runs one Reddit search on the remote actor per call. Holds no state
/// between calls; concurrent calls start independent runs.
pub struct Scraper {
    runner: Arc<dyn ActorRunner>,
    actor_id: String,
}

impl Scraper {
    pub fn new(runner: Arc<dyn ActorRunner>, actor_id: impl Into<String>) -> Self {
        Self {
            runner,
            actor_id: actor_id.into(),
        }
    }

    pub async fn run(&self, req: &ScrapeRequest) -> Result<Vec<Value>, ApifyError> {
        info!(
            actor_id = %self.actor_id,
            sort = %req.sort_by,
            time = %req.order_by,
            max_items = req.max_result,
            "Starting Reddit scrape"
        );

        let result = self.call(req).await;
        match &result {
            Ok(items) => info!(count = items.len(), "Reddit scrape finished"),
            Err(e) => error!(error = %e, kind = e.kind(), "Error running Apify actor"),
        }
        result
    }

    async fn call(&self, req: &ScrapeRequest) -> Result<Vec<Value>, ApifyError> {
        let input = serde_json::to_value(build_actor_input(req))?;
        let run = self.runner.call_actor(&self.actor_id, input).await?;
        self.runner.list_dataset_items(&run.default_dataset_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{items, MockActorRunner};
    use relay_common::{SortOrder, TimeWindow};
    use serde_json::json;

    fn request(query: &str) -> ScrapeRequest {
        ScrapeRequest {
            query_string: query.to_string(),
            order_by: TimeWindow::Month,
            search_type: "posts".to_string(),
            max_result: 50,
            sort_by: SortOrder::Hot,
        }
    }

    #[test]
    fn search_url_is_plain_concatenation() {
        for query in ["rust", "rust lang", "c++ & go?", "über#tag", "%20already"] {
            let input = build_actor_input(&request(query));
            assert_eq!(input.start_urls.len(), 1);
            assert_eq!(
                input.start_urls[0].url,
                format!("https://www.reddit.com/search/?q={query}")
            );
        }
    }

    #[test]
    fn fixed_fields_ignore_caller_input() {
        let variants = [
            request("a"),
            ScrapeRequest {
                max_result: 1,
                sort_by: SortOrder::Comments,
                order_by: TimeWindow::Hour,
                search_type: "communities".into(),
                ..request("b")
            },
            ScrapeRequest {
                max_result: u32::MAX,
                ..request("maxComments=99")
            },
        ];

        for req in &variants {
            let json = serde_json::to_value(build_actor_input(req)).unwrap();
            assert_eq!(json["maxComments"], 5);
            assert_eq!(json["maxCommunitiesCount"], 2);
            assert_eq!(json["maxUserCount"], 2);
            assert_eq!(json["scrollTimeout"], 40);
            assert_eq!(json["proxy"]["useApifyProxy"], true);
            assert_eq!(json["proxy"]["apifyProxyGroups"], json!(["RESIDENTIAL"]));
        }
    }

    #[test]
    fn caller_fields_map_to_actor_fields() {
        let json = serde_json::to_value(build_actor_input(&request("rust"))).unwrap();
        assert_eq!(json["sort"], "hot");
        assert_eq!(json["time"], "month");
        assert_eq!(json["type"], "posts");
        assert_eq!(json["maxItems"], 50);
    }

    #[tokio::test]
    async fn run_lists_the_dataset_of_the_finished_run() {
        let mock = Arc::new(MockActorRunner::new().with_dataset("ds-42").with_items(items(3)));
        let scraper = Scraper::new(mock.clone(), "trudax/reddit-scraper");

        let result = scraper.run(&request("rust")).await.unwrap();

        assert_eq!(result, items(3));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.listed_datasets(), vec!["ds-42".to_string()]);
        let (actor, input) = mock.last_call().unwrap();
        assert_eq!(actor, "trudax/reddit-scraper");
        assert_eq!(input["startUrls"][0]["url"], "https://www.reddit.com/search/?q=rust");
    }

    #[tokio::test]
    async fn failed_run_skips_dataset_listing() {
        let mock = Arc::new(
            MockActorRunner::new().fail_call(|| ApifyError::RunFailed {
                run_id: "r1".into(),
                status: "ABORTED".into(),
            }),
        );
        let scraper = Scraper::new(mock.clone(), "trudax/reddit-scraper");

        let err = scraper.run(&request("rust")).await.unwrap_err();

        assert!(matches!(err, ApifyError::RunFailed { .. }));
        assert_eq!(mock.call_count(), 1);
        assert!(mock.listed_datasets().is_empty());
    }

    #[tokio::test]
    async fn listing_failure_is_returned() {
        let mock = Arc::new(
            MockActorRunner::new().fail_list(|| ApifyError::Network("connection reset".into())),
        );
        let scraper = Scraper::new(mock.clone(), "trudax/reddit-scraper");

        let err = scraper.run(&request("rust")).await.unwrap_err();

        assert_eq!(err.to_string(), "Network error: connection reset");
        assert_eq!(mock.listed_datasets().len(), 1);
    }
}
