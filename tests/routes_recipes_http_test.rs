// ABOUTME: HTTP-level tests for the /v1 recipe routes and health probes
// ABOUTME: Drives the full router in-process and checks status codes and JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use common::memory_resources;
use helpers::axum_test::AxumTestRequest;
use recipe_server::routes;
use serde_json::{json, Value};

fn app() -> Router {
    routes::router(memory_resources())
}

async fn create(app: &Router, name: &str, preptime: f64) -> Value {
    AxumTestRequest::post("/v1/recipes")
        .json(&json!({
            "name": name,
            "preptime": preptime,
            "difficulty": 2,
            "vegetarian": true
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_create_and_get_recipe() {
    let app = app();

    let created = create(&app, "test recipe", 0.1).await;
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["name"], json!("test recipe"));
    assert_eq!(created["preptime"], json!(0.1));
    assert_eq!(created["ratings"], json!([]));

    let fetched: Value = AxumTestRequest::get("/v1/recipes/1")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_recipe_returns_404_error_body() {
    let body: Value = AxumTestRequest::get("/v1/recipes/11")
        .send(app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body, json!({ "error": "Recipe not found" }));
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let body: Value = AxumTestRequest::get("/v1/recipes/abc")
        .send(app())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_malformed_payload_returns_400() {
    let app = app();

    let body: Value = AxumTestRequest::post("/v1/recipes")
        .raw_body("application/json", "{\"name\": ")
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body, json!({ "error": "Invalid request payload" }));

    create(&app, "soup", 5.0).await;
    AxumTestRequest::put("/v1/recipes/1")
        .json(&json!({ "name": "missing fields" }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_and_patch_update_fields_and_keep_ratings() {
    let app = app();
    create(&app, "test recipe", 0.1).await;

    AxumTestRequest::post("/v1/recipes/1/rating")
        .json(&json!({ "rating": 3 }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let put: Value = AxumTestRequest::put("/v1/recipes/1")
        .json(&json!({
            "name": "test recipe - put",
            "preptime": 11.11,
            "difficulty": 3,
            "vegetarian": false
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(put["name"], json!("test recipe - put"));
    assert_eq!(put["ratings"], json!([3]));

    let patched: Value = AxumTestRequest::patch("/v1/recipes/1")
        .json(&json!({
            "name": "test recipe - patch",
            "preptime": 22.22,
            "difficulty": 4,
            "vegetarian": false
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(patched["difficulty"], json!(4));
    assert_eq!(patched["ratings"], json!([3]));

    AxumTestRequest::put("/v1/recipes/99")
        .json(&json!({
            "name": "ghost",
            "preptime": 1.0,
            "difficulty": 1,
            "vegetarian": true
        }))
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_recipe() {
    let app = app();
    create(&app, "test recipe", 0.1).await;

    let body: Value = AxumTestRequest::delete("/v1/recipes/1")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body, json!({ "result": "success" }));

    AxumTestRequest::get("/v1/recipes/1")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);
    AxumTestRequest::delete("/v1/recipes/1")
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let next = create(&app, "after delete", 1.0).await;
    assert_eq!(next["id"], json!(2));
}

#[tokio::test]
async fn test_rating_echoes_path_recipe_id() {
    let app = app();
    create(&app, "test recipe", 0.1).await;

    let rating: Value = AxumTestRequest::post("/v1/recipes/1/rating")
        .json(&json!({ "rating": 5 }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(rating, json!({ "recipe_id": 1, "rating": 5 }));

    AxumTestRequest::post("/v1/recipes/2/rating")
        .json(&json!({ "rating": 5 }))
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_clamps_pagination() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("recipe {i}"), f64::from(i)).await;
    }

    let page: Vec<Value> = AxumTestRequest::get("/v1/recipes")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page.len(), 10);

    let page: Vec<Value> = AxumTestRequest::get("/v1/recipes?start=10&count=50")
        .send(app.clone())
        .await
        .json();
    assert_eq!(page.len(), 2);

    let page: Vec<Value> = AxumTestRequest::get("/v1/recipes?start=-5&count=3")
        .send(app.clone())
        .await
        .json();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0]["name"], json!("recipe 0"));

    let page: Vec<Value> = AxumTestRequest::get("/v1/recipes?start=x&count=y")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page.len(), 10);
}

#[tokio::test]
async fn test_list_empty() {
    let page: Vec<Value> = AxumTestRequest::get("/v1/recipes")
        .send(app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_search_by_prep_time_with_form_body() {
    let app = app();
    create(&app, "test recipe", 0.1).await;
    create(&app, "slow recipe", 90.0).await;
    for rating in [3, 2] {
        AxumTestRequest::post("/v1/recipes/1/rating")
            .json(&json!({ "rating": rating }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);
    }

    let results: Vec<Value> = AxumTestRequest::post("/v1/recipes/search")
        .form("count=1&start=0&preptime=50.0")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], json!("test recipe"));
    assert_eq!(results[0]["preptime"], json!(0.1));
    assert_eq!(results[0]["avg_rating"], json!(2.5));
    assert!(results[0].get("ratings").is_none());
}

#[tokio::test]
async fn test_search_defaults_and_query_string() {
    let app = app();
    create(&app, "quick", 10.0).await;
    create(&app, "slow", 90.0).await;

    let all: Vec<Value> = AxumTestRequest::post("/v1/recipes/search")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1]["avg_rating"], json!(0.0));

    let quick: Vec<Value> = AxumTestRequest::post("/v1/recipes/search?preptime=30")
        .send(app.clone())
        .await
        .json();
    assert_eq!(quick.len(), 1);
    assert_eq!(quick[0]["name"], json!("quick"));

    let empty_bound: Vec<Value> = AxumTestRequest::post("/v1/recipes/search?preptime=")
        .send(app.clone())
        .await
        .json();
    assert_eq!(empty_bound.len(), 2);

    AxumTestRequest::post("/v1/recipes/search?preptime=soon")
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();

    let health: Value = AxumTestRequest::get("/health")
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], json!("healthy"));

    let ready: Value = AxumTestRequest::get("/ready")
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], json!("ready"));
    assert_eq!(ready["store"], json!("memory"));
}
