pub mod sqlite;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{MenuItem, RestaurantSummary};
use crate::normalize::{ProjectionError, project_catalog_restaurant, project_menu_item};

/// Collection holding one document per restaurant, keyed by restaurant id.
pub const RESTAURANTS: &str = "restaurantDetails";
/// Collection holding `{ "menu": [...] }` documents, keyed by restaurant id.
pub const MENUS: &str = "restaurant-menus";

/// One stored document. `body` carries the parse failure when the stored
/// bytes are not JSON, so one bad row never hides the rest of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: std::result::Result<Value, String>,
}

/// A schemaless document store. Could be SQLite, a hosted document DB, etc.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All documents in a collection, ordered by id. Errors are reserved for
    /// the store itself being unreadable.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;
}

/// Per-document result of a catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Kept(RestaurantSummary),
    Skipped { id: String, reason: ProjectionError },
}

/// Reads restaurants and menus out of a [`CatalogStore`].
pub struct CatalogReader {
    store: Arc<dyn CatalogStore>,
}

impl CatalogReader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Project every restaurant document, keeping failures tagged rather than
    /// dropping them silently.
    pub async fn project_all(&self) -> Result<Vec<Outcome>> {
        let docs = self
            .store
            .list(RESTAURANTS)
            .await
            .context("failed to list restaurants")?;

        Ok(docs
            .into_iter()
            .map(|Document { id, body }| {
                let projected = body
                    .map_err(ProjectionError::Unparsable)
                    .and_then(|doc| project_catalog_restaurant(&doc, &id));
                match projected {
                    Ok(summary) => Outcome::Kept(summary),
                    Err(reason) => Outcome::Skipped { id, reason },
                }
            })
            .collect())
    }

    /// All restaurants that project cleanly. Malformed documents are logged
    /// and left out.
    pub async fn list_restaurants(&self) -> Result<Vec<RestaurantSummary>> {
        let outcomes = self.project_all().await?;
        let total = outcomes.len();

        let restaurants: Vec<RestaurantSummary> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                Outcome::Kept(summary) => Some(summary),
                Outcome::Skipped { id, reason } => {
                    warn!(doc_id = %id, %reason, "skipping restaurant document");
                    None
                }
            })
            .collect();

        debug!("listed {} of {} restaurant documents", restaurants.len(), total);
        Ok(restaurants)
    }

    /// Menu for one restaurant. A missing document or `menu` field is an
    /// empty menu.
    pub async fn get_menu(&self, restaurant_id: &str) -> Result<Vec<MenuItem>> {
        let doc = self
            .store
            .get(MENUS, restaurant_id)
            .await
            .with_context(|| format!("failed to read menu for {restaurant_id}"))?;

        let Some(doc) = doc else {
            debug!("no menu document for {restaurant_id}");
            return Ok(Vec::new());
        };

        let Some(entries) = doc.get("menu").and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        Ok(entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                if entry.is_object() {
                    Some(project_menu_item(entry))
                } else {
                    warn!(restaurant_id, index, "skipping non-object menu entry");
                    None
                }
            })
            .collect())
    }
}
