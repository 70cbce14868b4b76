// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod meal;
pub mod targets;
pub mod user;

pub use meal::{MacroSet, MealRecord, MealType};
pub use targets::MacroTargets;
pub use user::User;
