//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The store handle is created once at startup and injected here; the
//! repositories are built from it per request and hold no state of their own.

use crate::config::AppConfig;
use crate::repositories::{MealPlanRepository, RecipeRepository};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: SqlitePool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Recipe repository over the shared pool
    pub fn recipes(&self) -> RecipeRepository {
        RecipeRepository::new(self.db.clone())
    }

    /// Meal plan repository over the shared pool
    pub fn meal_plans(&self) -> MealPlanRepository {
        MealPlanRepository::new(self.db.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn test_state_clone_shares_the_store() {
        let pool = db::create_memory_pool().await.unwrap();
        let state = AppState::new(pool, AppConfig::in_memory());
        let cloned = state.clone();

        let id = state
            .meal_plans()
            .create(&meal_planner_shared::NewMealPlan {
                name: "Sunday".to_string(),
                date: "2024-06-02".to_string(),
                recipe_ids: vec![1],
                notes: "roast".to_string(),
            })
            .await
            .unwrap();

        let plans = cloned.meal_plans().list().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, id);
    }
}
