// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meal record model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Category a meal was logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = UnknownMealType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(UnknownMealType(s.to_string())),
        }
    }
}

/// Error for an unrecognized meal type string.
#[derive(Debug, thiserror::Error)]
#[error("Unknown meal type: {0}")]
pub struct UnknownMealType(pub String);

/// One meal's macro nutrients. Always stored numerically; the legacy wire
/// format carries these as strings and they are parsed once at the route
/// boundary via [`MacroSet::parse_lossy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroSet {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fats in grams
    pub fats_g: f64,
}

impl MacroSet {
    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fats_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fats_g,
        }
    }

    /// Parse macro fields from their wire string form.
    ///
    /// A field that does not parse as a non-negative finite number becomes 0
    /// for that field only; the rest of the set is unaffected. Malformed
    /// fields are logged so the caller can surface a soft warning.
    pub fn parse_lossy(calories: &str, protein_g: &str, carbs_g: &str, fats_g: &str) -> Self {
        Self {
            calories: parse_macro_field(calories, "calories"),
            protein_g: parse_macro_field(protein_g, "protein_g"),
            carbs_g: parse_macro_field(carbs_g, "carbs_g"),
            fats_g: parse_macro_field(fats_g, "fats_g"),
        }
    }

    /// Copy of this set with any non-finite or negative field replaced by 0.
    ///
    /// Aggregation runs over sanitized values so one corrupt record can never
    /// poison a whole day's totals.
    pub fn sanitized(&self) -> Self {
        Self {
            calories: sanitize_macro_field(self.calories, "calories"),
            protein_g: sanitize_macro_field(self.protein_g, "protein_g"),
            carbs_g: sanitize_macro_field(self.carbs_g, "carbs_g"),
            fats_g: sanitize_macro_field(self.fats_g, "fats_g"),
        }
    }
}

fn parse_macro_field(raw: &str, field: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            tracing::warn!(field, raw, "Malformed macro field, substituting 0");
            0.0
        }
    }
}

fn sanitize_macro_field(value: f64, field: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!(field, value, "Invalid macro value, substituting 0");
        0.0
    }
}

/// Stored meal record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    /// Unique meal ID (also used as document ID), assigned at creation
    pub meal_id: Uuid,
    /// Owning user ID
    pub user_id: Uuid,
    /// Short display name ("Greek Yogurt Bowl")
    pub name: String,
    /// Free-text description of what was eaten
    pub description: String,
    /// Breakfast/lunch/dinner/snack
    pub meal_type: MealType,
    /// Macro nutrients for this meal
    pub macros: MacroSet,
    /// When the meal was eaten (distinct from the audit timestamp below)
    pub occurred_at: DateTime<Utc>,
    /// When this record was written
    pub created_at: DateTime<Utc>,
}
