//! API request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

// ============================================================================
// Recipe Types
// ============================================================================

/// Recipe creation request
///
/// Fields are kept as raw JSON so that type mismatches are reported per
/// field by the validator instead of failing the whole body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub instructions: Option<Value>,
    #[serde(default)]
    pub ingredients: Option<Value>,
    /// Minutes, either a JSON integer or a numeric string
    #[serde(default)]
    pub prep_time: Option<Value>,
}

/// Recipe list query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl RecipeQuery {
    /// Category filter, treating an empty value as no filter
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

// ============================================================================
// Meal Plan Types
// ============================================================================

/// Meal plan creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMealPlanRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    /// Key clients send the recipe list under
    #[serde(default)]
    pub recipes_ids: Option<Value>,
    /// Accepted spelling of `recipes_ids`; sending both is rejected
    #[serde(default)]
    pub recipe_ids: Option<Value>,
    #[serde(default)]
    pub notes: Option<Value>,
}

// ============================================================================
// Confirmation Types
// ============================================================================

/// Returned after a successful insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedResponse {
    pub id: i64,
    pub message: String,
}

impl SavedResponse {
    pub fn recipe(id: i64) -> Self {
        Self {
            id,
            message: format!("Recipe saved ID = {}", id),
        }
    }

    pub fn meal_plan(id: i64) -> Self {
        Self {
            id,
            message: format!("Meal plan saved ID = {}", id),
        }
    }
}

/// Returned after a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}

impl DeletedResponse {
    pub fn meal_plan() -> Self {
        Self {
            success: true,
            message: "Meal plan deleted successfully".to_string(),
        }
    }
}
