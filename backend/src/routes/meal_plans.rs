//! Meal plan API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};
use meal_planner_shared::{
    parse_resource_id, validate_new_meal_plan, CreateMealPlanRequest, DeletedResponse, MealPlan,
    SavedResponse, ValidationError,
};
use tracing::info;

/// Create meal plan routes
pub fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meal_plans).post(create_meal_plan))
        .route("/:id", delete(delete_meal_plan))
}

/// POST /api/meal-plans - Create a meal plan
///
/// Every referenced recipe must exist; unknown IDs are rejected with 400
/// and nothing is stored.
async fn create_meal_plan(
    State(state): State<AppState>,
    payload: Result<Json<CreateMealPlanRequest>, JsonRejection>,
) -> ApiResult<Json<SavedResponse>> {
    let Json(req) = payload?;
    let input = validate_new_meal_plan(&req)?;

    let missing = state.recipes().missing_ids(&input.recipe_ids).await?;
    if !missing.is_empty() {
        return Err(ValidationError::unknown_recipes(&missing).into());
    }

    let id = state.meal_plans().create(&input).await?;
    info!(meal_plan_id = id, "Meal plan saved");

    Ok(Json(SavedResponse::meal_plan(id)))
}

/// GET /api/meal-plans - List all meal plans
async fn list_meal_plans(State(state): State<AppState>) -> ApiResult<Json<Vec<MealPlan>>> {
    let plans = state.meal_plans().list().await?;
    Ok(Json(plans))
}

/// DELETE /api/meal-plans/:id - Delete a meal plan
async fn delete_meal_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = parse_resource_id(&raw_id, "meal plan")?;

    if state.meal_plans().delete(id).await? == 0 {
        return Err(ApiError::NotFound("Meal plan not found".to_string()));
    }
    info!(meal_plan_id = id, "Meal plan deleted");

    Ok(Json(DeletedResponse::meal_plan()))
}
