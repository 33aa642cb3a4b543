//! Fixed-size, 1-based pages over an ordered result set.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use super::deserializers::{deserialize_page, first_page};

pub const QUESTIONS_PER_PAGE: usize = 10;
pub const FIRST_PAGE: i64 = 1;

/// Returns the records of `page`. Pages before the first or past the last
/// are empty rather than an error.
pub fn paginate<T>(items: Vec<T>, page: i64) -> Vec<T> {
    let start = page
        .checked_sub(1)
        .and_then(|offset| usize::try_from(offset).ok())
        .and_then(|offset| offset.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) => items
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect(),
        None => Vec::new(),
    }
}

/// Number of the page holding the last of `total` records.
pub fn last_page(total: usize) -> i64 {
    i64::try_from(total.div_ceil(QUESTIONS_PER_PAGE)).unwrap_or(i64::MAX)
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    page: i64,
}

/// The `?page=` query parameter. Never rejects a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for Page {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<PageQuery>::try_from_uri(&parts.uri)
            .map(|Query(query)| query.page)
            .unwrap_or(FIRST_PAGE);
        Ok(Page(page))
    }
}
