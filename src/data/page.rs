use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

/// Query parameters for every paged endpoint, serialized as `page, size, sort, direction`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub direction: SortDirection,
}

impl PageParams {
    /// The ordering the student list uses: alphabetical by name.
    pub fn by_name(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: "name".to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub content: Vec<T>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

impl<T> PaginatedResponse<T> {
    /// 1-based `(from, to)` item numbers shown on this page, or `None` for an empty page.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.content.is_empty() || self.total_items == 0 {
            return None;
        }

        let size = u64::from(self.size);
        let from = u64::from(self.current_page) * size + 1;
        let to = (u64::from(self.current_page) + 1)
            .saturating_mul(size)
            .min(self.total_items);
        Some((from, to.max(from)))
    }
}
