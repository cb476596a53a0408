//! Offset/limit windowing over a fully materialized list.
//!
//! The provider is always asked for its default result set; paging happens
//! here, after normalization.

use thiserror::Error;

use crate::types::{Envelope, PageField};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_OFFSET: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("{field} must be a non-negative integer, got {value:?}")]
    NotANumber { field: PageField, value: String },
    #[error("{field} must not be negative, got {value:?}")]
    Negative { field: PageField, value: String },
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Build a page window from raw caller input. Absent values take the defaults.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, PageError> {
        Ok(Self {
            limit: parse_field(PageField::Limit, limit, DEFAULT_LIMIT)?,
            offset: parse_field(PageField::Offset, offset, DEFAULT_OFFSET)?,
        })
    }

    /// Pull `limit`/`offset` out of a query bag.
    ///
    /// Returns the page window and the remaining pairs in their original order.
    /// When a key repeats, the last occurrence wins and every occurrence is removed.
    pub fn split_query(
        query: Vec<(String, String)>,
    ) -> Result<(Self, Vec<(String, String)>), PageError> {
        let mut limit = None;
        let mut offset = None;
        let mut rest = Vec::with_capacity(query.len());

        for (key, value) in query {
            if key == PageField::Limit.as_str() {
                limit = Some(value);
            } else if key == PageField::Offset.as_str() {
                offset = Some(value);
            } else {
                rest.push((key, value));
            }
        }

        let page = Self::parse(limit.as_deref(), offset.as_deref())?;
        Ok((page, rest))
    }
}

fn parse_field(field: PageField, raw: Option<&str>, default: usize) -> Result<usize, PageError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    let not_a_number = || PageError::NotANumber {
        field,
        value: raw.to_string(),
    };

    // A leading '-' is only an error when the magnitude is non-zero.
    if let Some(magnitude) = trimmed.strip_prefix('-') {
        if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_a_number());
        }
        if magnitude.bytes().all(|b| b == b'0') {
            return Ok(0);
        }
        return Err(PageError::Negative {
            field,
            value: raw.to_string(),
        });
    }

    // `usize::from_str` accepts a leading '+', which is fine for numeric input.
    trimmed.parse::<usize>().map_err(|_| not_a_number())
}

/// Slice `list` to the requested window and wrap it in an [`Envelope`].
///
/// Out-of-range windows are clamped and yield fewer or zero records.
pub fn paginate<T>(list: Vec<T>, page: PageRequest) -> Envelope<T> {
    let total = list.len();
    let start = page.offset.min(total);
    let end = page.offset.saturating_add(page.limit).min(total);

    let data = list.into_iter().skip(start).take(end - start).collect();

    Envelope {
        total,
        offset: page.offset,
        limit: page.limit,
        data,
    }
}
