//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::pagination::{PageInfo, PageRequest};

/// Pagination query parameters.
///
/// Absent or empty values fall back to the defaults; non-numeric values are
/// rejected by the extractor.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Clamps the raw values into a [`PageRequest`].
    ///
    /// # Defaults
    ///
    /// - `page`: 1 (values below 1 become 1)
    /// - `page_size`: 10 (values below 1 become 10, values above 100 become 100)
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub current_page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl From<PageInfo> for PaginationMeta {
    fn from(info: PageInfo) -> Self {
        Self {
            current_page: info.current_page,
            page_size: info.page_size,
            total_pages: info.total_pages,
            total_items: info.total_items,
            has_next_page: info.has_next_page,
            has_prev_page: info.has_prev_page,
        }
    }
}
