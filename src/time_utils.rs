// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-day comparison and date navigation.
//!
//! Every screen that deals with "which day is this meal on" goes through this
//! module. Day comparisons are by (year, month, day) in the viewer's time
//! zone, never by raw timestamp subtraction, so DST shifts cannot produce
//! off-by-one days.

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Calendar day of a UTC instant, viewed in the given time zone.
pub fn local_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Whether two UTC instants fall on the same calendar day in `tz`.
pub fn same_calendar_day<Tz: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, tz: &Tz) -> bool {
    local_day(a, tz) == local_day(b, tz)
}

/// Direction for single-day navigation on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Back,
    Forward,
}

/// Step the selected date by exactly one calendar day, preserving the
/// time-of-day component. Saturates at the representable range rather than
/// failing.
pub fn step_day(selected: DateTime<Utc>, direction: StepDirection) -> DateTime<Utc> {
    let one_day = Days::new(1);
    let stepped = match direction {
        StepDirection::Back => selected.checked_sub_days(one_day),
        StepDirection::Forward => selected.checked_add_days(one_day),
    };
    stepped.unwrap_or(selected)
}

/// Whether forward navigation from `selected` is still allowed.
///
/// Stepping forward may land on "today" but never beyond it: the step is
/// permitted only while the selected day is on or before today's calendar day.
pub fn can_step_forward<Tz: TimeZone>(
    selected: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> bool {
    can_step_forward_day(local_day(selected, tz), local_day(now, tz))
}

/// Calendar-day form of [`can_step_forward`].
pub fn can_step_forward_day(selected_day: NaiveDate, today: NaiveDate) -> bool {
    selected_day <= today
}

/// Human label for a selected day: "Today", "Yesterday", or e.g.
/// "Monday, Jan 5".
pub fn day_label<Tz: TimeZone>(selected: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String {
    day_label_for(local_day(selected, tz), local_day(now, tz))
}

/// Calendar-day form of [`day_label`].
pub fn day_label_for(selected_day: NaiveDate, today: NaiveDate) -> String {
    if selected_day == today {
        return "Today".to_string();
    }
    if Some(selected_day) == today.pred_opt() {
        return "Yesterday".to_string();
    }
    selected_day.format("%A, %b %-d").to_string()
}
