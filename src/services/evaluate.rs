// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Target-progress evaluation for a day's aggregated totals.

use serde::Serialize;

use crate::models::MacroTargets;
use crate::services::aggregate::DailyTotals;

/// Tolerance band: a macro counts as achieved from 100% up to 110% of target.
const ACHIEVED_UPPER_PERCENT: f64 = 110.0;

/// Status of one macro relative to its daily target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroStatus {
    /// 100% to 110% of target
    Achieved,
    /// Above 110% of target, or any intake against a zero target
    Exceeded,
    /// Below target (including nothing logged yet)
    InProgress,
}

/// Whole-day classification across all four macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Perfect,
    Great,
    Good,
    Over,
    Start,
}

impl DayStatus {
    /// Dashboard banner message for this status.
    pub fn message(&self) -> &'static str {
        match self {
            DayStatus::Perfect => "Perfect day! All targets achieved!",
            DayStatus::Great => "Great progress on your goals!",
            DayStatus::Good => "Good progress, keep it up!",
            DayStatus::Over => "Watch your intake levels",
            DayStatus::Start => "Start tracking to see your progress",
        }
    }
}

/// Evaluation result for one macro.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroAssessment {
    pub status: MacroStatus,
    /// Percentage of target reached. 0 when the target is 0, so no
    /// NaN/Infinity can ever reach a caller.
    pub percentage: f64,
    /// Fraction for a capped progress bar, clamped to [0, 1].
    pub progress: f64,
}

/// Evaluation of a full day against the configured targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayEvaluation {
    pub calories: MacroAssessment,
    pub protein_g: MacroAssessment,
    pub carbs_g: MacroAssessment,
    pub fats_g: MacroAssessment,
    pub day: DayStatus,
}

impl DayEvaluation {
    fn assessments(&self) -> [&MacroAssessment; 4] {
        [&self.calories, &self.protein_g, &self.carbs_g, &self.fats_g]
    }
}

/// Assess one macro against its target.
///
/// A zero (or invalid) target never divides: zero intake against a zero
/// target is neutral `InProgress` with percentage 0, while any positive
/// intake against a zero target is over-target by definition.
fn assess(total: f64, target: f64) -> MacroAssessment {
    let total = if total.is_finite() && total > 0.0 {
        total
    } else {
        0.0
    };

    if !(target.is_finite() && target > 0.0) {
        let status = if total > 0.0 {
            MacroStatus::Exceeded
        } else {
            MacroStatus::InProgress
        };
        return MacroAssessment {
            status,
            percentage: 0.0,
            progress: 0.0,
        };
    }

    let percentage = total / target * 100.0;
    let status = if percentage > ACHIEVED_UPPER_PERCENT {
        MacroStatus::Exceeded
    } else if percentage >= 100.0 {
        MacroStatus::Achieved
    } else {
        MacroStatus::InProgress
    };

    MacroAssessment {
        status,
        percentage,
        progress: (total / target).min(1.0),
    }
}

/// Evaluate a day's totals against the configured targets.
///
/// Day status is decided by counting achieved and exceeded macros, first
/// match wins: 4 achieved is `Perfect`, 3+ `Great`, 2+ `Good`; only then does
/// 2+ exceeded classify as `Over`, and everything else is `Start`. A day with
/// 3 achieved and 1 exceeded is therefore `Great`, never `Over`.
pub fn evaluate(totals: &DailyTotals, targets: &MacroTargets) -> DayEvaluation {
    let calories = assess(totals.calories, targets.calories);
    let protein_g = assess(totals.protein_g, targets.protein_g);
    let carbs_g = assess(totals.carbs_g, targets.carbs_g);
    let fats_g = assess(totals.fats_g, targets.fats_g);

    let mut evaluation = DayEvaluation {
        calories,
        protein_g,
        carbs_g,
        fats_g,
        day: DayStatus::Start,
    };

    let achieved = evaluation
        .assessments()
        .iter()
        .filter(|a| a.status == MacroStatus::Achieved)
        .count();
    let exceeded = evaluation
        .assessments()
        .iter()
        .filter(|a| a.status == MacroStatus::Exceeded)
        .count();

    evaluation.day = if achieved == 4 {
        DayStatus::Perfect
    } else if achieved >= 3 {
        DayStatus::Great
    } else if achieved >= 2 {
        DayStatus::Good
    } else if exceeded >= 2 {
        DayStatus::Over
    } else {
        DayStatus::Start
    };

    evaluation
}
