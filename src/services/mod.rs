// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.
//!
//! Everything in here is a pure, synchronous computation over fully
//! materialized inputs: no I/O, no shared state, no failure modes. Callers
//! pass a snapshot of meal records and get a result; a fresher snapshot just
//! means calling again.

pub mod aggregate;
pub mod evaluate;
pub mod library;

pub use aggregate::{aggregate_for_day, meals_on_day, DailyTotals};
pub use evaluate::{evaluate, DayEvaluation, DayStatus, MacroAssessment, MacroStatus};
pub use library::{filter_meals, paginate, partition_by_day, LibraryView, Page, TypeFilter};
