//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::{AppError, FieldErrors};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;
const MAX_PER_PAGE: i64 = 100;

pub const PAGE_TOO_LARGE: &str = "Page is too large.";

/// Row offset of a 1-based page, or `None` if it does not fit in `i64`.
pub fn page_offset(page: i64, per_page: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(per_page)
}

/// `?page=&per_page=` for the customer list.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl PaginationParams {
    /// Applies defaults and bounds.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `per_page`: 10
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page < 1`, if `per_page` is outside
    /// `1..=100`, or if the page would start past the largest representable offset.
    ///
    /// # Returns
    ///
    /// `(page, per_page)`.
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);

        let mut fields = FieldErrors::new();
        if page < 1 {
            fields.insert(
                "page".to_string(),
                vec!["Must be greater than or equal to 1.".to_string()],
            );
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            fields.insert(
                "per_page".to_string(),
                vec![format!("Must be between 1 and {}.", MAX_PER_PAGE)],
            );
        } else if page >= 1 && page_offset(page, per_page).is_none() {
            fields.insert("page".to_string(), vec![PAGE_TOO_LARGE.to_string()]);
        }

        if fields.is_empty() {
            Ok((page, per_page))
        } else {
            Err(AppError::validation(fields))
        }
    }
}
