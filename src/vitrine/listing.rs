//! # Listing Presentation Adapter
//!
//! Slices pipeline output into the current page and renders the summary
//! line and pagination facts. "No products found" is a valid outcome here,
//! distinct from a loading state or an upstream fetch failure (those never
//! reach this module).

use crate::model::Item;

/// One renderable page of results.
#[derive(Debug, Clone)]
pub struct PageView {
    pub items: Vec<Item>,
    /// 1-based, clamped into `[1, total_pages]`.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub summary: String,
}

/// Slices `[(page-1)*size, page*size)` out of the ordered result set.
/// A page beyond the end clamps to the last page rather than rendering
/// empty; page 0 means page 1.
pub fn page_view(results: &[Item], page: usize, page_size: usize) -> PageView {
    let page_size = page_size.max(1);
    let total_items = results.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items: Vec<Item> = results[start.min(total_items)..end].to_vec();

    let summary = if total_items == 0 {
        "No products found".to_string()
    } else {
        format!(
            "Showing {}-{} of {} products",
            start + 1,
            end,
            total_items
        )
    };

    PageView {
        items,
        page,
        total_pages,
        total_items,
        summary,
    }
}
