//! Projection of untyped documents into [`model`](crate::model) records.
//!
//! Both upstream sources (the places provider and the catalog store) hand us
//! `serde_json::Value`s with no schema guarantee. Field coercions here never
//! fail; they fall back to a fixed default. Only a catalog restaurant can be
//! rejected as a whole, and the caller decides what to do with that.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{MenuItem, Position, RestaurantSummary};

/// Why a catalog document could not be projected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("document is not an object")]
    NotAnObject,
    #[error("field `{field}` has unexpected type {found}")]
    FieldType { field: &'static str, found: &'static str },
    #[error("cuisines[{index}] is not a string")]
    CuisineEntry { index: usize },
    #[error("stored document is not valid JSON: {0}")]
    Unparsable(String),
}

/// Numbers pass through, numeric strings are parsed, everything else is 0.0.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// `true`, any casing of `"true"`, and the number 1 are true. Nothing else is.
pub fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Join category labels with `", "`.
///
/// Entries are either bare strings or objects carrying a `name` string.
/// Anything else is skipped.
pub fn join_labels(values: Option<&Value>) -> String {
    let Some(entries) = values.and_then(Value::as_array) else {
        return String::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("name").and_then(Value::as_str),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Meters to kilometers, two decimals. Ties round half up, so 125 m is
/// `"0.13"` rather than the banker's `"0.12"`.
pub fn format_km(meters: f64) -> String {
    format!("{:.2}", (meters / 10.0).round() / 100.0)
}

/// Project one entry of a places-search `results` array.
pub fn project_place(raw: &Value) -> RestaurantSummary {
    let geocode = raw.pointer("/geocodes/main");
    let coordinate = |key: &str| {
        geocode
            .and_then(|g| g.get(key))
            .map(coerce_number)
            .unwrap_or(0.0)
    };

    RestaurantSummary {
        name: text(raw.get("name")),
        address: text(raw.pointer("/location/formatted_address")),
        cuisine: join_labels(raw.get("categories")),
        position: Position {
            lat: coordinate("latitude"),
            lng: coordinate("longitude"),
        },
        distance: raw.get("distance").map(|d| format_km(coerce_number(d))),
        ..RestaurantSummary::default()
    }
}

/// Project a `restaurantDetails` document.
///
/// Missing fields take defaults; fields that are present with the wrong shape
/// reject the whole document.
pub fn project_catalog_restaurant(
    raw: &Value,
    doc_id: &str,
) -> Result<RestaurantSummary, ProjectionError> {
    let doc = raw.as_object().ok_or(ProjectionError::NotAnObject)?;

    let cuisines = cuisine_list(doc)?;
    let number = |key: &str| doc.get(key).map(coerce_number).unwrap_or(0.0);

    Ok(RestaurantSummary {
        id: Some(doc_id.to_string()),
        name: strict_text(doc, "name")?.unwrap_or_default(),
        address: strict_text(doc, "address")?.unwrap_or_default(),
        cuisine: cuisines.join(", "),
        position: Position {
            lat: number("latitude"),
            lng: number("longitude"),
        },
        distance: None,
        rating: rating(doc)?,
        cuisines: Some(cuisines),
    })
}

/// Project one entry of a menu document's `menu` array.
pub fn project_menu_item(raw: &Value) -> MenuItem {
    MenuItem {
        name: text(raw.get("name")),
        price: raw.get("price").map(coerce_number).unwrap_or(0.0),
        description: text(raw.get("description")),
        category: text(raw.get("category")),
        is_veg: raw.get("isVeg").map(coerce_boolean).unwrap_or(false),
    }
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn strict_text(
    doc: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ProjectionError> {
    match doc.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ProjectionError::FieldType {
            field,
            found: type_name(other),
        }),
    }
}

fn rating(doc: &Map<String, Value>) -> Result<Option<String>, ProjectionError> {
    match doc.get("rating") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ProjectionError::FieldType {
            field: "rating",
            found: type_name(other),
        }),
    }
}

fn cuisine_list(doc: &Map<String, Value>) -> Result<Vec<String>, ProjectionError> {
    match doc.get("cuisines") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or(ProjectionError::CuisineEntry { index })
            })
            .collect(),
        Some(other) => Err(ProjectionError::FieldType {
            field: "cuisines",
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
