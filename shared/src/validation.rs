//! Input validation functions
//!
//! Each validator turns a loosely typed request into a normalized value or
//! a [`ValidationError`] listing every field that failed. Type coercion is
//! done by hand here; range and length rules live on the model structs as
//! `validator` derive attributes and are merged into the same report.

use crate::models::{NewMealPlan, NewRecipe};
use crate::types::{CreateMealPlanRequest, CreateRecipeRequest};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Field order used when reporting recipe errors
pub const RECIPE_FIELDS: &[&str] = &["name", "category", "instructions", "ingredients", "prep_time"];

/// Field order used when reporting meal plan errors
pub const MEAL_PLAN_FIELDS: &[&str] = &["name", "date", "recipe_ids", "notes"];

/// Validate a recipe creation request
pub fn validate_new_recipe(req: &CreateRecipeRequest) -> Result<NewRecipe, ValidationError> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", req.name.as_ref());
    let category = required_text(&mut errors, "category", req.category.as_ref());
    let instructions = required_text(&mut errors, "instructions", req.instructions.as_ref());
    let ingredients = required_text(&mut errors, "ingredients", req.ingredients.as_ref());
    let prep_time = required_integer(&mut errors, "prep_time", req.prep_time.as_ref());

    let input = NewRecipe {
        name: name.unwrap_or_default(),
        category: category.unwrap_or_default(),
        instructions: instructions.unwrap_or_default(),
        ingredients: ingredients.unwrap_or_default(),
        prep_time: prep_time.unwrap_or_default(),
    };
    merge_rule_errors(&mut errors, input.validate());

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(ValidationError::from_fields(errors, RECIPE_FIELDS))
    }
}

/// Validate a meal plan creation request
///
/// Checks that `recipe_ids` is a non-empty array of positive integers.
/// Whether those recipes exist is checked by the caller against the store.
pub fn validate_new_meal_plan(req: &CreateMealPlanRequest) -> Result<NewMealPlan, ValidationError> {
    let mut errors = Vec::new();

    let name = required_text(&mut errors, "name", req.name.as_ref());
    let date = required_text(&mut errors, "date", req.date.as_ref());
    let recipe_ids = match (&req.recipes_ids, &req.recipe_ids) {
        (Some(_), Some(_)) => {
            errors.push(FieldError::new(
                "recipe_ids",
                "send either recipes_ids or recipe_ids, not both",
            ));
            None
        }
        (wire, alias) => required_id_list(&mut errors, "recipe_ids", wire.as_ref().or(alias.as_ref())),
    };
    let notes = required_text(&mut errors, "notes", req.notes.as_ref());

    let input = NewMealPlan {
        name: name.unwrap_or_default(),
        date: date.unwrap_or_default(),
        recipe_ids: recipe_ids.unwrap_or_default(),
        notes: notes.unwrap_or_default(),
    };
    merge_rule_errors(&mut errors, input.validate());

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(ValidationError::from_fields(errors, MEAL_PLAN_FIELDS))
    }
}

/// Parse a path identifier, accepting only positive integers
pub fn parse_resource_id(raw: &str, resource: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::invalid_id(resource))
}

fn required_text(errors: &mut Vec<FieldError>, field: &str, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.push(FieldError::new(field, "must not be empty"));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

/// Accepts a JSON integer or a string holding one
fn required_integer(errors: &mut Vec<FieldError>, field: &str, value: Option<&Value>) -> Option<i64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            return None;
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.push(FieldError::new(field, "must not be empty"));
            return None;
        }
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(Value::Number(number)) => number.as_i64().or_else(|| number.as_f64().and_then(whole_float)),
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.push(FieldError::new(field, "must be a whole number"));
    }
    parsed
}

/// `10.0` counts as 10; anything fractional or beyond exact f64 range does not
fn whole_float(value: f64) -> Option<i64> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    (value.fract() == 0.0 && value.abs() <= EXACT_LIMIT).then_some(value as i64)
}

fn required_id_list(errors: &mut Vec<FieldError>, field: &str, value: Option<&Value>) -> Option<Vec<i64>> {
    let items = match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FieldError::new(field, "must be a list of recipe IDs"));
            return None;
        }
    };

    let before = errors.len();
    let ids: Vec<i64> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_i64().filter(|id| *id > 0) {
            Some(id) => Some(id),
            None => {
                errors.push(FieldError::new(
                    field,
                    format!("entry {} must be a positive recipe ID", index),
                ));
                None
            }
        })
        .collect();

    (errors.len() == before).then_some(ids)
}

/// Fold derive-rule failures into the report, skipping fields that already
/// failed coercion (their placeholder values would only add noise).
fn merge_rule_errors(errors: &mut Vec<FieldError>, outcome: Result<(), ValidationErrors>) {
    let Err(report) = outcome else {
        return;
    };

    for (field, failures) in report.field_errors() {
        let field = field.to_string();
        if errors.iter().any(|e| e.field == field) {
            continue;
        }
        for failure in failures.iter() {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| failure.code.to_string());
            errors.push(FieldError::new(&field, message));
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "id" => "ID",
        "name" => "Name",
        "category" => "Category",
        "instructions" => "Instructions",
        "ingredients" => "Ingredients",
        "prep_time" => "Prep Time",
        "date" => "Date",
        "recipe_ids" | "recipes_ids" => "Recipes",
        "notes" => "Notes",
        _ => field_name,
    }
}

/// A single failed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub display_label: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            display_label: get_field_display_label(field).to_string(),
            message: message.into(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Rejected input, with every failing field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Build a report, ordering errors by the operation's field order
    pub fn from_fields(mut errors: Vec<FieldError>, order: &[&str]) -> Self {
        errors.sort_by_key(|e| {
            order
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(order.len())
        });

        let mut fields: Vec<&str> = Vec::new();
        for error in &errors {
            if !fields.contains(&error.field.as_str()) {
                fields.push(&error.field);
            }
        }
        let message = format!("Missing or invalid fields: {}", fields.join(", "));

        Self { message, errors }
    }

    /// Path identifier that is not a positive integer
    pub fn invalid_id(resource: &str) -> Self {
        Self {
            message: format!("Invalid {} ID", resource),
            errors: vec![FieldError::new("id", "must be a positive integer")],
        }
    }

    /// Meal plan referencing recipes that do not exist
    pub fn unknown_recipes(ids: &[i64]) -> Self {
        let listed = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            message: format!("Unknown recipe IDs: {}", listed),
            errors: vec![FieldError::new(
                "recipe_ids",
                format!("no recipe exists with ID {}", listed),
            )],
        }
    }

    /// The failing field, when exactly one field failed
    pub fn single_field(&self) -> Option<&str> {
        let first = self.errors.first()?;
        self.errors
            .iter()
            .all(|e| e.field == first.field)
            .then_some(first.field.as_str())
    }
}
