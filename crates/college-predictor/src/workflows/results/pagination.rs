use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: usize = 10;
/// Pages shown on each side of the current page in the page window.
pub const WINDOW_RADIUS: usize = 2;

/// Always at least one page, even for an empty result set.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One entry of a rendered page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Windowed page range: the first and last page are always present, up to
/// [`WINDOW_RADIUS`] pages either side of the current one, and a gap wherever
/// the window does not reach an edge.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);

    let window_start = current.saturating_sub(WINDOW_RADIUS).max(2);
    let window_end = (current + WINDOW_RADIUS).min(total.saturating_sub(1));

    let mut links = vec![PageLink::Page(1)];
    if current > WINDOW_RADIUS + 2 {
        links.push(PageLink::Gap);
    }
    links.extend((window_start..=window_end).map(PageLink::Page));
    if current + WINDOW_RADIUS + 1 < total {
        links.push(PageLink::Gap);
    }
    if total > 1 {
        links.push(PageLink::Page(total));
    }
    links
}
