//! Common test utilities for integration tests
//!
//! Every `TestApp` owns a private in-memory database, so tests run in
//! parallel without sharing state or needing an external server.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use meal_planner_backend::{config::AppConfig, db, routes, state::AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub async fn new() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create in-memory database");

        let state = AppState::new(pool.clone(), AppConfig::in_memory());
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, Body::empty()).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        self.send("POST", path, Body::from(body.to_string())).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, String) {
        self.send("DELETE", path, Body::empty()).await
    }

    /// POST a recipe and return its id
    pub async fn create_recipe(&self, name: &str, category: &str) -> i64 {
        let body = json!({
            "name": name,
            "category": category,
            "instructions": "Chop, simmer, serve",
            "ingredients": "onion,stock",
            "prep_time": 30
        });

        let (status, response) = self.post("/api/recipes", &body.to_string()).await;
        assert_eq!(status, StatusCode::OK, "recipe insert failed: {}", response);

        let response: Value = serde_json::from_str(&response).unwrap();
        response["id"].as_i64().unwrap()
    }

    /// Number of rows in a table
    pub async fn count(&self, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap();
        count
    }

    async fn send(&self, method: &str, path: &str, body: Body) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}
