use crate::error::{AppError, AppResult};
use crate::models::PageInfo;

/// Reject page numbers and sizes that cannot address a page
pub fn validate_page(page: u32, page_size: u32) -> AppResult<()> {
    if page == 0 {
        return Err(AppError::Validation("Page must be at least 1".into()));
    }
    if page_size == 0 {
        return Err(AppError::Validation("Page size must be at least 1".into()));
    }
    Ok(())
}

/// Slice `hits` to the requested 1-based page.
///
/// A page past the end yields the last page instead of an empty slice.
/// Zero hits yields an empty page with zero total pages.
pub fn paginate<T>(hits: Vec<T>, page: u32, page_size: u32) -> AppResult<(Vec<T>, PageInfo)> {
    validate_page(page, page_size)?;

    let total = hits.len();
    let size = page_size as usize;
    let total_pages = (total + size - 1) / size;

    let mut start = (page as usize - 1).saturating_mul(size);
    if start >= total {
        start = total_pages.saturating_sub(1) * size;
    }
    let end = start.saturating_add(size).min(total);

    let info = PageInfo {
        page,
        page_size,
        total_pages: total_pages as u32,
        total_hits: total as u32,
    };

    let page_hits = hits.into_iter().skip(start).take(end - start).collect();
    Ok((page_hits, info))
}
