//! Recipe API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use meal_planner_shared::{
    parse_resource_id, validate_new_recipe, CreateRecipeRequest, Recipe, RecipeQuery,
    SavedResponse,
};
use tracing::info;

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/:id", get(get_recipe))
}

/// GET /api/recipes - List recipes
///
/// `?category=` restricts the list to one category; an empty value is
/// ignored.
async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<RecipeQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Recipe>>> {
    let Query(query) = query?;
    let recipes = state.recipes().list(query.category_filter()).await?;
    Ok(Json(recipes))
}

/// GET /api/recipes/:id - Get a single recipe
async fn get_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    let id = parse_resource_id(&raw_id, "recipe")?;

    let recipe = state
        .recipes()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    Ok(Json(recipe))
}

/// POST /api/recipes - Add a new recipe
async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> ApiResult<Json<SavedResponse>> {
    let Json(req) = payload?;
    let input = validate_new_recipe(&req)?;

    let id = state.recipes().create(&input).await?;
    info!(recipe_id = id, "Recipe saved");

    Ok(Json(SavedResponse::recipe(id)))
}
