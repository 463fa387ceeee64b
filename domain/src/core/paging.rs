//! Page numbers for paginated tools

use crate::core::error::{AdapterError, AdapterResult};

/// Validate a 1-based page number; absent means the first page
pub fn page_number(page: Option<i64>) -> AdapterResult<u32> {
    match page {
        None => Ok(1),
        Some(page) if page >= 1 => u32::try_from(page)
            .map_err(|_| AdapterError::invalid(format!("page {} is out of range", page))),
        Some(page) => Err(AdapterError::invalid(format!(
            "page must be 1 or greater, got {}",
            page
        ))),
    }
}

/// Slice one page out of an already complete result list
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: usize) -> Vec<T> {
    let skip = (page as usize).saturating_sub(1).saturating_mul(page_size);
    items.into_iter().skip(skip).take(page_size).collect()
}
