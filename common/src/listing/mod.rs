//! Filtering, sorting and pagination of aggregated logbook rows.
//!
//! This is the logic behind the staff logbook table. It is a pure function of
//! the rows returned by `getAllLogbooks`, the current [`ListQuery`] and the
//! current calendar day, so a client build and the server tests share it.
//!
//! - **Search** is a case-insensitive substring match against name, NIM,
//!   activity, output, address and the raw date string. A row matches if any
//!   field contains the term.
//! - **Date windows** compare calendar days, not elapsed hours: a row dated
//!   yesterday at 23:59 is never "today". Rows whose date cannot be read only
//!   appear under [`DateFilter::All`].
//! - **Sorting** is stable, so rows that compare equal keep the aggregator's
//!   newest-appended-first order.
//! - **Pages** hold [`PAGE_SIZE`] rows. [`ListState`] sends the page back to 1
//!   whenever the search term, date window or sort order is set.

use crate::model::logbook::LogbookView;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateFilter {
    Today,
    Last3Days,
    Last7Days,
    #[default]
    All,
}

impl DateFilter {
    /// Largest absolute day difference from today the window admits.
    fn max_days(&self) -> Option<i64> {
        match self {
            DateFilter::Today => Some(0),
            DateFilter::Last3Days => Some(3),
            DateFilter::Last7Days => Some(7),
            DateFilter::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Date and time combined, latest first.
    #[default]
    Newest,
    /// Date and time combined, earliest first.
    Oldest,
    DateNewest,
    DateOldest,
    /// Raw time string compared lexicographically, greatest first.
    TimeNewest,
    TimeOldest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search_term: String,
    pub date_filter: DateFilter,
    pub sort_order: SortOrder,
}

/// One page of the filtered, sorted list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<&'a LogbookView>,
    /// 1-based page number actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

/// Query plus current page, as held by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    query: ListQuery,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        ListState {
            query: ListQuery::default(),
            page: 1,
        }
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.page = 1;
    }

    pub fn set_date_filter(&mut self, filter: DateFilter) {
        self.query.date_filter = filter;
        self.page = 1;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.query.sort_order = order;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filters, sorts and slices `rows` for the current state.
    pub fn view<'a>(&self, rows: &'a [LogbookView], today: NaiveDate) -> Page<'a> {
        let mut selected = filter_rows(rows, &self.query, today);
        sort_rows(&mut selected, self.query.sort_order);
        paginate(selected, self.page)
    }
}

/// Keeps the rows matching both the search term and the date window.
pub fn filter_rows<'a>(
    rows: &'a [LogbookView],
    query: &ListQuery,
    today: NaiveDate,
) -> Vec<&'a LogbookView> {
    let term = query.search_term.trim().to_lowercase();
    rows.iter()
        .filter(|row| term.is_empty() || matches_term(row, &term))
        .filter(|row| within_window(row, query.date_filter, today))
        .collect()
}

fn matches_term(row: &LogbookView, term: &str) -> bool {
    [
        &row.name,
        &row.nim,
        &row.activity,
        &row.output,
        &row.address,
        &row.date,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

fn within_window(row: &LogbookView, filter: DateFilter, today: NaiveDate) -> bool {
    let Some(max_days) = filter.max_days() else {
        return true;
    };
    match parse_date(&row.date) {
        Some(date) => (today - date).num_days().abs() <= max_days,
        None => false,
    }
}

/// Sorts in place according to `order`.
pub fn sort_rows(rows: &mut [&LogbookView], order: SortOrder) {
    match order {
        SortOrder::Newest => rows.sort_by(|a, b| date_time_key(b).cmp(&date_time_key(a))),
        SortOrder::Oldest => rows.sort_by(|a, b| date_time_key(a).cmp(&date_time_key(b))),
        SortOrder::DateNewest => rows.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date))),
        SortOrder::DateOldest => rows.sort_by(|a, b| parse_date(&a.date).cmp(&parse_date(&b.date))),
        SortOrder::TimeNewest => rows.sort_by(|a, b| b.time.cmp(&a.time)),
        SortOrder::TimeOldest => rows.sort_by(|a, b| a.time.cmp(&b.time)),
    }
}

/// Slices one page out of `rows`, clamping `page` into range.
pub fn paginate(rows: Vec<&LogbookView>, page: usize) -> Page<'_> {
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(PAGE_SIZE).max(1);
    let page = page.clamp(1, total_pages);
    let rows = rows
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    Page {
        rows,
        page,
        total_pages,
        total_rows,
    }
}

/// Reads `YYYY-MM-DD`, also when followed by a time part.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M:%S", "%H:%M", "%H.%M.%S", "%H.%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

fn date_time_key(row: &LogbookView) -> Option<NaiveDateTime> {
    let date = parse_date(&row.date)?;
    Some(date.and_time(parse_time(&row.time).unwrap_or_default()))
}
