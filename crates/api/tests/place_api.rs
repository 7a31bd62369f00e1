//! HTTP-level integration tests for the place endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::{header, StatusCode};
use common::{
    body_json, build_test_app, create_place, get, multipart_body, post_json, post_multipart,
    test_pool, BLOB_BASE_URL,
};

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_place_returns_201_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = post_json(
        app,
        "/places/",
        serde_json::json!({"name": "Harbour", "latitude": 12.5, "longitude": 45.0}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    let id = json["id"].as_i64().unwrap();

    assert_eq!(location, format!("/places/{id}"));
    assert_eq!(json["name"], "Harbour");
    assert_eq!(json["latitude"], 12.5);
    assert_eq!(json["longitude"], 45.0);
    assert_eq!(json["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_create_without_trailing_slash() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = post_json(app, "/places", serde_json::json!({"name": "Pier"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_ignores_client_id_and_defaults_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let json = body_json(
        post_json(
            app,
            "/places/",
            serde_json::json!({
                "id": 999,
                "photos": [{"id": 1, "placeId": 999, "photoUploadUrl": "x"}],
            }),
        )
        .await,
    )
    .await;

    assert_ne!(json["id"], 999);
    assert_eq!(json["name"], "");
    assert_eq!(json["latitude"], 0.0);
    assert_eq!(json["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_create_then_get_returns_identical_place() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let created = create_place(&app, "Old Town", -33.86, 151.2).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(app, &format!("/places/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_get_nonexistent_place_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = get(app, "/places/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_with_non_integer_id_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = get(app, "/places/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_returns_all_created_places() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let mut ids = Vec::new();
    for i in 0..3 {
        let place = create_place(&app, &format!("Place {i}"), i as f64, 0.0).await;
        ids.push(place["id"].as_i64().unwrap());
    }

    let response = get(app, "/places").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let mut listed: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    listed.sort_unstable();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_empty_returns_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = get(app, "/places").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Name search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_by_name_returns_single_match() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let lighthouse = create_place(&app, "Old Lighthouse", 0.0, 0.0).await;
    create_place(&app, "Market", 0.0, 0.0).await;

    let id = lighthouse["id"].as_i64().unwrap();
    let upload = post_multipart(
        app.clone(),
        &format!("/places/{id}/photos"),
        multipart_body("file", Some("lamp.jpg"), b"x"),
    )
    .await;
    assert_eq!(upload.status(), StatusCode::CREATED);

    let response = get(app, "/places/search/Light").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], id);

    let photos = results[0]["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["placeId"], id);
    assert_eq!(
        photos[0]["photoUploadUrl"],
        format!("{BLOB_BASE_URL}/uploads/lamp.jpg")
    );
}

#[tokio::test]
async fn test_search_by_name_decodes_path() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    create_place(&app, "Old Lighthouse", 0.0, 0.0).await;

    let json = body_json(get(app, "/places/search/Old%20Light").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_without_match_returns_200_and_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    create_place(&app, "Market", 0.0, 0.0).await;

    let response = get(app, "/places/search/nothing-here").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Location search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_search_by_location_returns_places_inside_box() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let near = create_place(&app, "Near", 12.6, 45.1).await;
    create_place(&app, "Far", 40.0, -3.7).await;

    let response = get(app, "/places/search/location/12.5,45.0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], near["id"]);
}

#[tokio::test]
async fn test_search_by_location_respects_radius() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    create_place(&app, "Two degrees away", 14.5, 45.0).await;

    let narrow = body_json(get(app.clone(), "/places/search/location/12.5,45.0").await).await;
    assert_eq!(narrow, serde_json::json!([]));

    let wide = body_json(get(app, "/places/search/location/12.5,45.0?radius=3").await).await;
    assert_eq!(wide.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_by_location_rejects_unparseable_coordinate() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    for bad in ["abc", "12.5", "12.5,north"] {
        let response = get(app.clone(), &format!("/places/search/location/{bad}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "input: {bad}");
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }
}

#[tokio::test]
async fn test_search_by_location_rejects_negative_radius() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_test_app(test_pool().await, dir.path());

    let response = get(app, "/places/search/location/1,1?radius=-2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
