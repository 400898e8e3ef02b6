//! Project-wide constants.

use std::path::PathBuf;

/// Places search endpoint of the provider.
pub const PLACES_SEARCH_URL: &str = "https://api.foursquare.com/v3/places/search";

/// Provider category id for "Dining and Drinking".
pub const FOOD_CATEGORY: &str = "13065";

pub const SORT_BY_DISTANCE: &str = "DISTANCE";

/// Nearby search: 10 km radius, 20 results.
pub const NEARBY_RADIUS_METERS: u32 = 10_000;
pub const NEARBY_LIMIT: u32 = 20;

/// Cuisine lookup: only the single closest place within 50 m.
pub const CUISINE_RADIUS_METERS: u32 = 50;
pub const CUISINE_LIMIT: u32 = 1;

/// Returned by the cuisine lookup when nothing is found at the coordinate.
pub const UNKNOWN_CUISINE: &str = "Unknown Cuisine";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

/// Default catalog path: `~/.foodie/catalog.db`.
/// Falls back to the working directory when there is no home directory.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".foodie"))
        .unwrap_or_default()
        .join("catalog.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_path_ends_with_catalog_db() {
        assert!(default_db_path().ends_with("catalog.db"));
    }

    #[test]
    fn cuisine_lookup_is_narrower_than_nearby() {
        assert!(CUISINE_RADIUS_METERS < NEARBY_RADIUS_METERS);
        assert!(CUISINE_LIMIT < NEARBY_LIMIT);
    }
}
