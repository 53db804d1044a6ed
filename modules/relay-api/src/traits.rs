// The remote actor boundary.
//
// ActorRunner is the only way the relay talks to the scraping platform, so
// handlers can be driven by MockActorRunner in tests with no network.

use apify_client::{ApifyClient, ApifyError, RunData};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ActorRunner: Send + Sync {
    /// Start a run of `actor_id` with `input` and wait for it to finish.
    async fn call_actor(&self, actor_id: &str, input: Value) -> Result<RunData, ApifyError>;

    /// Fetch every record a finished run wrote to its dataset.
    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, ApifyError>;
}

#[async_trait]
impl ActorRunner for ApifyClient {
    async fn call_actor(&self, actor_id: &str, input: Value) -> Result<RunData, ApifyError> {
        ApifyClient::call_actor(self, actor_id, &input).await
    }

    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, ApifyError> {
        self.get_dataset_items(dataset_id).await
    }
}
