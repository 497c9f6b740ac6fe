use crate::{
    api::StudentApi,
    data::{
        page::{PageParams, PaginatedResponse},
        student::Student,
    },
};

pub const LOAD_FAILED: &str = "Failed to load students. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete student. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub size: u32,
}

/// State behind the student list: what was searched for, which page we're on, and what came
/// back for it.
#[derive(Debug, Clone)]
pub struct StudentList {
    pub search_term: String,
    pub pagination: Pagination,
    pub students: Vec<Student>,
    /// 1-based item numbers on this page, for the "showing X to Y" line.
    pub showing: Option<(u64, u64)>,
    pub error: Option<&'static str>,
}

impl StudentList {
    pub fn new(size: u32) -> Self {
        Self::restore(String::new(), 0, 0, size)
    }

    /// Rebuilds the list state a previous render left behind, before anything is fetched.
    pub const fn restore(search_term: String, current_page: u32, total_pages: u32, size: u32) -> Self {
        Self {
            search_term,
            pagination: Pagination {
                current_page,
                total_pages,
                total_items: 0,
                size,
            },
            students: Vec::new(),
            showing: None,
            error: None,
        }
    }

    pub fn page_params(&self) -> PageParams {
        PageParams::by_name(self.pagination.current_page, self.pagination.size)
    }

    /// A new search always starts again from the first page.
    pub fn submit_search(&mut self, term: String) {
        self.search_term = term;
        self.pagination.current_page = 0;
    }

    /// Moves to `page` if it exists, returning whether anything changed.
    pub fn change_page(&mut self, page: i64) -> bool {
        match u32::try_from(page) {
            Ok(page) if page < self.pagination.total_pages => {
                self.pagination.current_page = page;
                true
            }
            _ => {
                debug!(page, total_pages = self.pagination.total_pages, "ignoring out of range page change");
                false
            }
        }
    }

    /// Replaces everything with a freshly fetched page.
    pub fn apply(&mut self, page: PaginatedResponse<Student>) {
        self.showing = page.item_range();
        self.pagination = Pagination {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            size: page.size,
        };
        self.students = page.content;
    }

    pub async fn refresh(&mut self, api: &StudentApi) {
        self.error = None;

        if !self.fetch(api).await {
            return;
        }

        // the page we were on can vanish underneath us, e.g. deleting the last row of the last page
        let Pagination {
            current_page,
            total_pages,
            total_items,
            ..
        } = self.pagination;
        if total_items > 0 && current_page >= total_pages {
            debug!(current_page, total_pages, "page no longer exists, stepping back");
            self.pagination.current_page = total_pages.saturating_sub(1);
            self.fetch(api).await;
        }
    }

    async fn fetch(&mut self, api: &StudentApi) -> bool {
        match api.search_paged(&self.search_term, &self.page_params()).await {
            Ok(page) => {
                self.apply(page);
                true
            }
            Err(e) => {
                warn!(?e, "unable to load students");
                self.error = Some(LOAD_FAILED);
                false
            }
        }
    }

    /// Deletes a student and reloads the current page so the counts stay right.
    pub async fn delete(&mut self, api: &StudentApi, id: i64) {
        let deleted = match api.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(?e, id, "unable to delete student");
                false
            }
        };

        self.refresh(api).await;

        if deleted {
            info!(id, "deleted student");
        } else {
            self.error = Some(DELETE_FAILED);
        }
    }
}
