//! Output records. Built fresh per request, never mutated after projection.

use serde::{Deserialize, Serialize};

/// A coordinate pair. Missing or unparsable source values land as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant as returned by both the places proxy and the catalog.
///
/// `id`, `rating` and `cuisines` only come from the catalog; `distance` only
/// from a places search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestaurantSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub address: String,
    /// Comma-joined labels, `""` when there are none.
    pub cuisine: String,
    pub position: Position,
    /// Kilometers with two decimals, e.g. `"1.50"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisines: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    #[serde(rename = "isVeg")]
    pub is_veg: bool,
}
