//! Database repositories
//!
//! Provides data access layer for database operations. Each repository
//! owns a clone of the injected pool and issues one parameterized
//! statement per call.

pub mod meal_plans;
pub mod recipes;

pub use meal_plans::MealPlanRepository;
pub use recipes::RecipeRepository;
