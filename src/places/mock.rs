use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{PlacesSearch, SearchQuery};

/// A scripted places search for tests. Returns pre-defined bodies in order
/// and remembers every query it was asked.
pub struct MockPlaces {
    responses: Vec<Value>,
    index: AtomicUsize,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockPlaces {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses,
            index: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesSearch for MockPlaces {
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        self.queries.lock().unwrap().push(*query);
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockPlaces: no more responses (called {} times)", i + 1))
    }
}
