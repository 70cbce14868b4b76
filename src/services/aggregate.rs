// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily macro aggregation for the dashboard.
//!
//! Totals are recomputed on demand from the full record snapshot and never
//! cached; records can be deleted between calls, so a cached total could go
//! stale silently.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::{MacroSet, MealRecord};
use crate::time_utils::local_day;

/// Sum of macros over all meals on one calendar day. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl DailyTotals {
    /// Add one meal's macros to the running totals.
    ///
    /// Values are sanitized first: a corrupt field contributes 0 without
    /// affecting the record's other fields or the rest of the day.
    pub fn accumulate(&mut self, macros: &MacroSet) {
        let m = macros.sanitized();
        self.calories += m.calories;
        self.protein_g += m.protein_g;
        self.carbs_g += m.carbs_g;
        self.fats_g += m.fats_g;
    }
}

/// Sum macros over the records whose `occurred_at` falls on `day` in the
/// viewer's time zone.
///
/// Order-independent and total: any input permutation yields the same result,
/// and no record set can make it fail. Empty or non-matching input produces
/// all-zero totals.
pub fn aggregate_for_day<Tz: TimeZone>(
    records: &[MealRecord],
    day: NaiveDate,
    tz: &Tz,
) -> DailyTotals {
    let mut totals = DailyTotals::default();
    for record in records {
        if local_day(record.occurred_at, tz) == day {
            totals.accumulate(&record.macros);
        }
    }
    totals
}

/// Borrowed view of the records on one calendar day, most recent first.
pub fn meals_on_day<'a, Tz: TimeZone>(
    records: &'a [MealRecord],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a MealRecord> {
    let mut meals: Vec<&MealRecord> = records
        .iter()
        .filter(|r| local_day(r.occurred_at, tz) == day)
        .collect();
    meals.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    meals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, MacroSet};
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn meal(occurred_at: &str, macros: MacroSet) -> MealRecord {
        let occurred_at: DateTime<Utc> = occurred_at.parse().expect("valid timestamp");
        MealRecord {
            meal_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Test Meal".to_string(),
            description: "test".to_string(),
            meal_type: MealType::Lunch,
            macros,
            occurred_at,
            created_at: occurred_at,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn test_sums_matching_day_only() {
        let records = vec![
            meal("2024-03-15T08:00:00Z", MacroSet::new(400.0, 30.0, 40.0, 10.0)),
            meal("2024-03-15T13:00:00Z", MacroSet::new(600.0, 50.0, 50.0, 20.0)),
            meal("2024-03-14T19:00:00Z", MacroSet::new(300.0, 20.0, 30.0, 5.0)),
        ];

        let totals = aggregate_for_day(&records, day("2024-03-15"), &Utc);
        assert_eq!(totals.calories, 1000.0);
        assert_eq!(totals.protein_g, 80.0);
        assert_eq!(totals.carbs_g, 90.0);
        assert_eq!(totals.fats_g, 30.0);
    }

    #[test]
    fn test_empty_input_is_zero() {
        let totals = aggregate_for_day(&[], day("2024-03-15"), &Utc);
        assert_eq!(totals, DailyTotals::default());
    }

    #[test]
    fn test_corrupt_field_contributes_zero() {
        let records = vec![
            meal(
                "2024-03-15T08:00:00Z",
                MacroSet::new(f64::NAN, 30.0, 40.0, 10.0),
            ),
            meal("2024-03-15T13:00:00Z", MacroSet::new(600.0, 50.0, 50.0, 20.0)),
        ];

        let totals = aggregate_for_day(&records, day("2024-03-15"), &Utc);
        // Corrupt calories drops out; the record's valid fields still count
        assert_eq!(totals.calories, 600.0);
        assert_eq!(totals.protein_g, 80.0);
        assert_eq!(totals.carbs_g, 90.0);
        assert_eq!(totals.fats_g, 30.0);
    }

    #[test]
    fn test_day_filter_uses_viewer_zone() {
        // 01:00 UTC on the 16th is dinner on the 15th for a UTC-5 viewer
        let records = vec![meal(
            "2024-03-16T01:00:00Z",
            MacroSet::new(500.0, 25.0, 45.0, 15.0),
        )];
        let eastern = chrono::FixedOffset::west_opt(5 * 3600).expect("valid offset");

        let utc_totals = aggregate_for_day(&records, day("2024-03-15"), &Utc);
        assert_eq!(utc_totals.calories, 0.0);

        let local_totals = aggregate_for_day(&records, day("2024-03-15"), &eastern);
        assert_eq!(local_totals.calories, 500.0);
    }

    #[test]
    fn test_meals_on_day_sorted_descending() {
        let records = vec![
            meal("2024-03-15T08:00:00Z", MacroSet::default()),
            meal("2024-03-15T13:00:00Z", MacroSet::default()),
            meal("2024-03-14T19:00:00Z", MacroSet::default()),
        ];

        let meals = meals_on_day(&records, day("2024-03-15"), &Utc);
        assert_eq!(meals.len(), 2);
        assert!(meals[0].occurred_at > meals[1].occurred_at);
    }
}
