pub mod foursquare;
pub mod mock;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::consts::{
    CUISINE_LIMIT, CUISINE_RADIUS_METERS, FOOD_CATEGORY, NEARBY_LIMIT, NEARBY_RADIUS_METERS,
    SORT_BY_DISTANCE, UNKNOWN_CUISINE,
};
use crate::model::RestaurantSummary;
use crate::normalize::{join_labels, project_place};

/// One places-search request. Category and sort order are always food and
/// distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub limit: u32,
}

impl SearchQuery {
    /// Restaurants within 10 km.
    pub fn nearby(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: NEARBY_RADIUS_METERS,
            limit: NEARBY_LIMIT,
        }
    }

    /// The single restaurant standing at the coordinate.
    pub fn closest(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: CUISINE_RADIUS_METERS,
            limit: CUISINE_LIMIT,
        }
    }

    /// Query-string pairs in the provider's vocabulary.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ll", format!("{},{}", self.lat, self.lng)),
            ("radius", self.radius.to_string()),
            ("categories", FOOD_CATEGORY.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", SORT_BY_DISTANCE.to_string()),
        ]
    }
}

/// Anything that answers a places search with the provider's raw JSON body.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub restaurants: Vec<RestaurantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineResponse {
    pub cuisine: String,
}

/// Nearby restaurants and cuisine guesses on top of a [`PlacesSearch`].
pub struct PlacesService {
    search: Arc<dyn PlacesSearch>,
}

impl PlacesService {
    pub fn new(search: Arc<dyn PlacesSearch>) -> Self {
        Self { search }
    }

    pub async fn fetch_nearby(&self, lat: f64, lng: f64) -> Result<NearbyResponse> {
        let body = self.search.search(&SearchQuery::nearby(lat, lng)).await?;
        let restaurants: Vec<RestaurantSummary> = results(&body).iter().map(project_place).collect();
        debug!("{} restaurants near {lat},{lng}", restaurants.len());
        Ok(NearbyResponse { restaurants })
    }

    /// Guess the cuisine at a coordinate from the closest place's categories.
    /// A place without categories yields `""`; only an empty search is unknown.
    pub async fn fetch_cuisine(&self, lat: f64, lng: f64) -> Result<CuisineResponse> {
        let body = self.search.search(&SearchQuery::closest(lat, lng)).await?;
        let cuisine = results(&body)
            .first()
            .map(|place| join_labels(place.get("categories")))
            .unwrap_or_else(|| UNKNOWN_CUISINE.to_string());
        Ok(CuisineResponse { cuisine })
    }
}

fn results(body: &Value) -> &[Value] {
    match body.get("results").and_then(Value::as_array) {
        Some(results) => results,
        None => {
            warn!("places response has no results array");
            &[]
        }
    }
}
