//! Meal Planner Shared Library
//!
//! This crate contains the models, wire types and input validation used by
//! the backend. Nothing here performs I/O.

pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::*;
pub use types::*;
pub use validation::{
    parse_resource_id, validate_new_meal_plan, validate_new_recipe, FieldError, ValidationError,
};
