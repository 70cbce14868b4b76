// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal library browsing: free-text search, meal-type filter, today/previous
//! partition, and per-partition pagination.

use chrono::{NaiveDate, TimeZone};

use crate::models::{MealRecord, MealType};
use crate::time_utils::local_day;

/// Library page size observed in the client.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Meal-type filter with an explicit pass-through state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MealType),
}

impl TypeFilter {
    pub fn matches(&self, meal_type: MealType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == meal_type,
        }
    }
}

/// Filter records by free-text query and meal type.
///
/// The text match is a case-insensitive substring test against name OR
/// description; an empty query matches everything.
pub fn filter_meals<'a>(
    records: &'a [MealRecord],
    query: &str,
    type_filter: TypeFilter,
) -> Vec<&'a MealRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|r| {
            let matches_text = needle.is_empty()
                || r.name.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle);
            matches_text && type_filter.matches(r.meal_type)
        })
        .collect()
}

/// Split records into (today, previous) against a reference day.
///
/// The partitions are mutually exclusive and collectively exhaustive: every
/// input record lands in exactly one of the two.
pub fn partition_by_day<'a, Tz: TimeZone>(
    records: &[&'a MealRecord],
    today: NaiveDate,
    tz: &Tz,
) -> (Vec<&'a MealRecord>, Vec<&'a MealRecord>) {
    records
        .iter()
        .partition(|r| local_day(r.occurred_at, tz) == today)
}

/// One page of a record listing.
#[derive(Debug)]
pub struct Page<'a> {
    pub items: Vec<&'a MealRecord>,
    /// 1-based page actually returned (after clamping)
    pub page: usize,
    /// Total pages, at least 1 even for an empty listing
    pub page_count: usize,
    /// Total records across all pages
    pub total: usize,
}

/// Paginate records, most recent first.
///
/// `page_number` is 1-based; out-of-range requests clamp to the nearest valid
/// page instead of failing, so a stale page number after a delete still
/// renders something sensible.
pub fn paginate<'a>(records: &[&'a MealRecord], page_size: usize, page_number: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let total = records.len();
    let page_count = total.div_ceil(page_size).max(1);
    let page = page_number.clamp(1, page_count);

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    let start = (page - 1) * page_size;
    let items = sorted
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_count,
        total,
    }
}

/// Client-side browsing state for the library view.
///
/// Owns the current query, type filter, and the independent page numbers of
/// the two partitions. Changing either filter resets both page numbers to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryView {
    pub query: String,
    pub type_filter: TypeFilter,
    pub today_page: usize,
    pub previous_page: usize,
}

impl Default for LibraryView {
    fn default() -> Self {
        Self {
            query: String::new(),
            type_filter: TypeFilter::All,
            today_page: 1,
            previous_page: 1,
        }
    }
}

impl LibraryView {
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.reset_pages();
        }
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        if self.type_filter != type_filter {
            self.type_filter = type_filter;
            self.reset_pages();
        }
    }

    fn reset_pages(&mut self) {
        self.today_page = 1;
        self.previous_page = 1;
    }
}
