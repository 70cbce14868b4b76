// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily macro target configuration.

use serde::{Deserialize, Serialize};

/// A user's daily macro goals.
///
/// Stored at `targets/{user_id}` and replaced wholesale on save; there is no
/// partial update. A field of 0 means "no target" for that macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily calorie goal (kcal)
    pub calories: f64,
    /// Daily protein goal (grams)
    pub protein_g: f64,
    /// Daily carbohydrate goal (grams)
    pub carbs_g: f64,
    /// Daily fat goal (grams)
    pub fats_g: f64,
}

impl Default for MacroTargets {
    /// Starter targets shown until the user saves their own.
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein_g: 150.0,
            carbs_g: 200.0,
            fats_g: 65.0,
        }
    }
}

impl MacroTargets {
    /// All fields finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein_g, self.carbs_g, self.fats_g]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets() {
        let targets = MacroTargets::default();
        assert_eq!(targets.calories, 2000.0);
        assert_eq!(targets.protein_g, 150.0);
        assert_eq!(targets.carbs_g, 200.0);
        assert_eq!(targets.fats_g, 65.0);
    }

    #[test]
    fn test_validity() {
        assert!(MacroTargets::default().is_valid());
        assert!(MacroTargets {
            calories: 0.0,
            ..MacroTargets::default()
        }
        .is_valid());
        assert!(!MacroTargets {
            protein_g: -1.0,
            ..MacroTargets::default()
        }
        .is_valid());
        assert!(!MacroTargets {
            fats_g: f64::NAN,
            ..MacroTargets::default()
        }
        .is_valid());
    }
}
