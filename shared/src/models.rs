//! Domain models for the Meal Planner application
//!
//! `Recipe` and `MealPlan` are the persisted entities as returned by the
//! API. `NewRecipe` and `NewMealPlan` are the normalized inputs produced
//! by [`crate::validation`] and consumed by the repositories.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub instructions: String,
    /// Free-form ingredient list, stored as given
    pub ingredients: String,
    /// Preparation time in minutes
    pub prep_time: i64,
}

/// A stored meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlan {
    pub id: i64,
    pub name: String,
    pub date: String,
    /// Recipe ids in the order they were submitted
    pub recipe_ids: Vec<i64>,
    pub notes: String,
}

/// Validated input for inserting a recipe
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewRecipe {
    pub name: String,
    pub category: String,
    pub instructions: String,
    pub ingredients: String,
    #[validate(range(min = 1, message = "must be a positive number of minutes"))]
    pub prep_time: i64,
}

/// Validated input for inserting a meal plan
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewMealPlan {
    pub name: String,
    pub date: String,
    #[validate(length(min = 1, message = "must contain at least one recipe"))]
    pub recipe_ids: Vec<i64>,
    pub notes: String,
}
