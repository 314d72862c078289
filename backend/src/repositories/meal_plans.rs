//! Meal plan repository - database operations for meal plans
//!
//! `recipe_ids` is stored as JSON text and decoded on read. The column is
//! not a foreign key; existence of the referenced recipes is checked before
//! insert by the caller.

use crate::db::WriteOutcome;
use anyhow::{Context, Result};
use meal_planner_shared::{MealPlan, NewMealPlan};
use sqlx::SqlitePool;
use tracing::debug;

/// Meal plan row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
struct MealPlanRow {
    id: i64,
    name: String,
    date: String,
    recipe_ids: String,
    notes: String,
}

impl TryFrom<MealPlanRow> for MealPlan {
    type Error = anyhow::Error;

    fn try_from(row: MealPlanRow) -> Result<Self> {
        let recipe_ids = serde_json::from_str(&row.recipe_ids)
            .with_context(|| format!("meal plan {} has malformed recipe_ids", row.id))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            date: row.date,
            recipe_ids,
            notes: row.notes,
        })
    }
}

/// Meal plan repository
#[derive(Clone)]
pub struct MealPlanRepository {
    db: SqlitePool,
}

impl MealPlanRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a new meal plan, returning its generated ID
    pub async fn create(&self, input: &NewMealPlan) -> Result<i64> {
        let recipe_ids = serde_json::to_string(&input.recipe_ids)?;

        let outcome: WriteOutcome = sqlx::query(
            r#"
            INSERT INTO meal_plans (name, date, recipe_ids, notes)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.date)
        .bind(&recipe_ids)
        .bind(&input.notes)
        .execute(&self.db)
        .await?
        .into();

        let id = outcome
            .last_insert_id
            .context("meal plan insert did not report a row id")?;

        debug!(meal_plan_id = id, recipes = input.recipe_ids.len(), "Meal plan created");
        Ok(id)
    }

    /// List every meal plan
    pub async fn list(&self) -> Result<Vec<MealPlan>> {
        let rows = sqlx::query_as::<_, MealPlanRow>(
            "SELECT id, name, date, recipe_ids, notes FROM meal_plans ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MealPlan::try_from).collect()
    }

    /// Delete a meal plan, returning the number of rows removed
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let outcome: WriteOutcome = sqlx::query("DELETE FROM meal_plans WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .into();

        debug!(meal_plan_id = id, rows_affected = outcome.rows_affected, "Meal plan delete");
        Ok(outcome.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn repository() -> MealPlanRepository {
        MealPlanRepository::new(db::create_memory_pool().await.unwrap())
    }

    fn plan(name: &str, recipe_ids: Vec<i64>) -> NewMealPlan {
        NewMealPlan {
            name: name.to_string(),
            date: "2024-06-03".to_string(),
            recipe_ids,
            notes: "double the rice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_recipe_ids_round_trip_in_order() {
        let repo = repository().await;
        let id = repo.create(&plan("Monday", vec![3, 1, 2])).await.unwrap();

        let plans = repo.list().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, id);
        assert_eq!(plans[0].recipe_ids, vec![3, 1, 2]);
        assert_eq!(plans[0].notes, "double the rice");
    }

    #[tokio::test]
    async fn test_delete_existing_removes_exactly_one() {
        let repo = repository().await;
        let keep = repo.create(&plan("Monday", vec![1])).await.unwrap();
        let remove = repo.create(&plan("Tuesday", vec![2])).await.unwrap();

        assert_eq!(repo.delete(remove).await.unwrap(), 1);

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_storage_unchanged() {
        let repo = repository().await;
        repo.create(&plan("Monday", vec![1])).await.unwrap();
        let before = repo.list().await.unwrap();

        assert_eq!(repo.delete(999_999).await.unwrap(), 0);
        assert_eq!(repo.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = repository().await;
        let first = repo.create(&plan("Monday", vec![1])).await.unwrap();
        repo.delete(first).await.unwrap();

        let second = repo.create(&plan("Tuesday", vec![1])).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_malformed_recipe_ids_is_an_error() {
        let pool = db::create_memory_pool().await.unwrap();
        sqlx::query(
            "INSERT INTO meal_plans (name, date, recipe_ids, notes) VALUES ('Bad', '2024-06-03', 'not json', 'x')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let err = MealPlanRepository::new(pool).list().await.unwrap_err();
        assert!(err.to_string().contains("malformed recipe_ids"));
    }
}
