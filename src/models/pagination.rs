use serde::{Deserialize, Serialize};

/// Server-computed paging summary mirrored by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Pagination {
    /// Summary for a set that fits on one page.
    pub fn single_page(total_items: u64, items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items,
            items_per_page,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
