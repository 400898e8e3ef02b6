use std::sync::Arc;

use serde_json::json;

use foodie::catalog::sqlite::SqliteCatalog;
use foodie::catalog::{CatalogReader, MENUS, Outcome, RESTAURANTS};
use foodie::model::Position;
use foodie::normalize::ProjectionError;

fn reader(store: SqliteCatalog) -> CatalogReader {
    CatalogReader::new(Arc::new(store))
}

#[tokio::test]
async fn list_restaurants_projects_every_document() {
    let store = SqliteCatalog::in_memory().unwrap();
    store
        .insert(
            RESTAURANTS,
            "r1",
            &json!({
                "name": "Curry House",
                "address": "22 Elm Rd",
                "cuisines": ["Indian", "Vegan"],
                "rating": "4.5",
                "latitude": 12.5,
                "longitude": "77.25"
            }),
        )
        .unwrap();
    store
        .insert(RESTAURANTS, "r2", &json!({"name": "Taqueria", "cuisines": ["Mexican"]}))
        .unwrap();

    let restaurants = reader(store).list_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 2);

    let first = &restaurants[0];
    assert_eq!(first.id.as_deref(), Some("r1"));
    assert_eq!(first.cuisine, "Indian, Vegan");
    assert_eq!(first.position, Position { lat: 12.5, lng: 77.25 });
    assert_eq!(first.rating.as_deref(), Some("4.5"));

    assert_eq!(restaurants[1].id.as_deref(), Some("r2"));
    assert_eq!(restaurants[1].cuisine, "Mexican");
}

#[tokio::test]
async fn missing_coordinates_default_to_zero() {
    let store = SqliteCatalog::in_memory().unwrap();
    store
        .insert(RESTAURANTS, "plain", &json!({"name": "Plain"}))
        .unwrap();

    let restaurants = reader(store).list_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].position, Position { lat: 0.0, lng: 0.0 });
}

#[tokio::test]
async fn malformed_document_is_skipped_not_fatal() {
    let store = SqliteCatalog::in_memory().unwrap();
    store
        .insert(RESTAURANTS, "a-good", &json!({"name": "Good"}))
        .unwrap();
    store
        .insert(RESTAURANTS, "b-bad", &json!({"name": "Bad", "cuisines": {"main": "Thai"}}))
        .unwrap();
    store
        .insert(RESTAURANTS, "c-good", &json!({"name": "Also good"}))
        .unwrap();

    let restaurants = reader(store).list_restaurants().await.unwrap();
    let ids: Vec<_> = restaurants.iter().filter_map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec!["a-good", "c-good"]);
}

#[tokio::test]
async fn project_all_tags_each_document() {
    let store = SqliteCatalog::in_memory().unwrap();
    store.insert(RESTAURANTS, "a", &json!({"name": "A"})).unwrap();
    store.insert(RESTAURANTS, "b", &json!("just a string")).unwrap();

    let outcomes = reader(store).project_all().await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(&outcomes[0], Outcome::Kept(r) if r.name == "A"));
    assert_eq!(
        outcomes[1],
        Outcome::Skipped {
            id: "b".to_string(),
            reason: ProjectionError::NotAnObject,
        }
    );
}

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let store = SqliteCatalog::in_memory().unwrap();
    assert!(reader(store).list_restaurants().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_menu_projects_items() {
    let store = SqliteCatalog::in_memory().unwrap();
    store
        .insert(
            MENUS,
            "r1",
            &json!({"menu": [
                {"name": "Dal", "price": "6.5", "description": "Lentils", "category": "Mains", "isVeg": true},
                {"name": "Lamb Curry", "price": 12, "category": "Mains", "isVeg": "false"}
            ]}),
        )
        .unwrap();

    let menu = reader(store).get_menu("r1").await.unwrap();
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0].name, "Dal");
    assert_eq!(menu[0].price, 6.5);
    assert!(menu[0].is_veg);
    assert_eq!(menu[1].price, 12.0);
    assert_eq!(menu[1].description, "");
    assert!(!menu[1].is_veg);
}

#[tokio::test]
async fn get_menu_for_unknown_restaurant_is_empty() {
    let store = SqliteCatalog::in_memory().unwrap();
    assert!(reader(store).get_menu("nope").await.unwrap().is_empty());
}

#[tokio::test]
async fn get_menu_without_menu_array_is_empty() {
    let store = SqliteCatalog::in_memory().unwrap();
    store.insert(MENUS, "r1", &json!({})).unwrap();
    store.insert(MENUS, "r2", &json!({"menu": "soon"})).unwrap();

    let reader = reader(store);
    assert!(reader.get_menu("r1").await.unwrap().is_empty());
    assert!(reader.get_menu("r2").await.unwrap().is_empty());
}

#[tokio::test]
async fn get_menu_skips_non_object_entries() {
    let store = SqliteCatalog::in_memory().unwrap();
    store
        .insert(MENUS, "r1", &json!({"menu": ["junk", {"name": "Naan"}, null]}))
        .unwrap();

    let menu = reader(store).get_menu("r1").await.unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "Naan");
}

#[tokio::test]
async fn unparsable_row_is_skipped_not_fatal() {
    let store = SqliteCatalog::in_memory().unwrap();
    store.insert(RESTAURANTS, "a", &json!({"name": "Good"})).unwrap();
    store.insert_raw(RESTAURANTS, "b", "{").unwrap();

    let reader = reader(store);
    let restaurants = reader.list_restaurants().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].name, "Good");

    let outcomes = reader.project_all().await.unwrap();
    assert!(matches!(
        &outcomes[1],
        Outcome::Skipped { id, reason: ProjectionError::Unparsable(_) } if id == "b"
    ));
}

#[tokio::test]
async fn corrupt_menu_document_propagates() {
    let store = SqliteCatalog::in_memory().unwrap();
    store.insert_raw(MENUS, "r1", "{").unwrap();

    let err = reader(store).get_menu("r1").await.unwrap_err();
    assert!(err.to_string().contains("failed to read menu for r1"));
}
