// Test mocks for the relay.
//
// MockActorRunner (ActorRunner): records every call, returns a fixed run and
// dataset, or a configured failure for either remote step.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use apify_client::{ApifyError, RunData};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::traits::ActorRunner;

type ErrorFactory = Box<dyn Fn() -> ApifyError + Send + Sync>;

/// `n` distinct Reddit-like records, in order.
pub fn items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": format!("t3_{i}"),
                "dataType": "post",
                "title": format!("Post {i}"),
                "upVotes": i * 10,
            })
        })
        .collect()
}

pub struct MockActorRunner {
    dataset_id: String,
    items: Vec<Value>,
    call_error: Option<ErrorFactory>,
    list_error: Option<ErrorFactory>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<(String, Value)>>,
    listed: Mutex<Vec<String>>,
}

impl MockActorRunner {
    pub fn new() -> Self {
        Self {
            dataset_id: "dataset-1".to_string(),
            items: Vec::new(),
            call_error: None,
            list_error: None,
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
            listed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_dataset(mut self, dataset_id: &str) -> Self {
        self.dataset_id = dataset_id.to_string();
        self
    }

    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    pub fn fail_call(mut self, err: impl Fn() -> ApifyError + Send + Sync + 'static) -> Self {
        self.call_error = Some(Box::new(err));
        self
    }

    pub fn fail_list(mut self, err: impl Fn() -> ApifyError + Send + Sync + 'static) -> Self {
        self.list_error = Some(Box::new(err));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, Value)> {
        self.inputs.lock().unwrap().last().cloned()
    }

    pub fn listed_datasets(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

impl Default for MockActorRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorRunner for MockActorRunner {
    async fn call_actor(&self, actor_id: &str, input: Value) -> Result<RunData, ApifyError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs
            .lock()
            .unwrap()
            .push((actor_id.to_string(), input));
        // Let concurrent requests interleave.
        tokio::task::yield_now().await;

        if let Some(err) = &self.call_error {
            return Err(err());
        }
        Ok(RunData {
            id: format!("run-{n}"),
            status: "SUCCEEDED".to_string(),
            default_dataset_id: self.dataset_id.clone(),
            started_at: None,
            finished_at: None,
        })
    }

    async fn list_dataset_items(&self, dataset_id: &str) -> Result<Vec<Value>, ApifyError> {
        self.listed.lock().unwrap().push(dataset_id.to_string());
        if let Some(err) = &self.list_error {
            return Err(err());
        }
        Ok(self.items.clone())
    }
}
