//! Recipe repository - database operations for recipes

use crate::db::WriteOutcome;
use anyhow::{Context, Result};
use meal_planner_shared::{NewRecipe, Recipe};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

/// Recipe row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    category: String,
    instructions: String,
    ingredients: String,
    prep_time: i64,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            instructions: row.instructions,
            ingredients: row.ingredients,
            prep_time: row.prep_time,
        }
    }
}

const SELECT_RECIPES: &str =
    "SELECT id, name, category, instructions, ingredients, prep_time FROM recipes";

/// Recipe repository
#[derive(Clone)]
pub struct RecipeRepository {
    db: SqlitePool,
}

impl RecipeRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// List recipes, optionally restricted to one category
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Recipe>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_RECIPES);
        if let Some(category) = category {
            query.push(" WHERE category = ").push_bind(category);
        }
        query.push(" ORDER BY id ASC");

        let rows = query
            .build_query_as::<RecipeRow>()
            .fetch_all(&self.db)
            .await?;

        debug!(category = ?category, count = rows.len(), "Listed recipes");
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    /// Find recipe by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!("{} WHERE id = ?", SELECT_RECIPES))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(Recipe::from))
    }

    /// Create a new recipe, returning its generated ID
    pub async fn create(&self, input: &NewRecipe) -> Result<i64> {
        let outcome: WriteOutcome = sqlx::query(
            r#"
            INSERT INTO recipes (name, category, instructions, ingredients, prep_time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.instructions)
        .bind(&input.ingredients)
        .bind(input.prep_time)
        .execute(&self.db)
        .await?
        .into();

        let id = outcome
            .last_insert_id
            .context("recipe insert did not report a row id")?;

        debug!(recipe_id = id, category = %input.category, "Recipe created");
        Ok(id)
    }

    /// IDs from `ids` that have no recipe, in first-seen order
    pub async fn missing_ids(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT id FROM recipes WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found: Vec<i64> = query
            .build_query_scalar::<i64>()
            .fetch_all(&self.db)
            .await?;

        let mut missing = Vec::new();
        for id in ids {
            if !found.contains(id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        Ok(missing)
    }
}
