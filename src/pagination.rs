use maud::{Markup, html};

const WINDOW: u32 = 5;
const REACH: u32 = WINDOW / 2;

/// The page buttons to draw around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub current: u32,
    pub total: u32,
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    /// `None` when there is at most one page, as there is nothing to navigate between.
    pub fn new(current: u32, total: u32) -> Option<Self> {
        if total <= 1 {
            return None;
        }

        let last = total - 1;
        let current = current.min(last);

        let mut start = current.saturating_sub(REACH);
        let mut end = current.saturating_add(REACH).min(last);

        // shift towards whichever edge we hit instead of showing a short window
        if end - start + 1 < WINDOW {
            if start == 0 {
                end = (WINDOW - 1).min(last);
            } else if end == last {
                start = total.saturating_sub(WINDOW);
            }
        }

        Some(Self {
            current,
            total,
            start,
            end,
        })
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    pub const fn show_first(&self) -> bool {
        self.start > 0
    }

    pub const fn leading_ellipsis(&self) -> bool {
        self.start > 1
    }

    pub const fn show_last(&self) -> bool {
        self.end < self.total - 1
    }

    pub const fn trailing_ellipsis(&self) -> bool {
        self.end + 2 < self.total
    }

    pub const fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub const fn has_next(&self) -> bool {
        self.current + 1 < self.total
    }
}

const PAGE_BUTTON: &str = "px-3 py-1 rounded-md mx-1 text-gray-300 hover:bg-gray-700";
const CURRENT_BUTTON: &str = "px-3 py-1 rounded-md mx-1 bg-blue-600 text-white";
const DISABLED_BUTTON: &str = "px-3 py-1 rounded-md mx-1 text-gray-500 cursor-not-allowed";

/// Where the page buttons send their requests.
pub struct PageLinks<'a, F> {
    pub endpoint: &'a str,
    pub target: &'a str,
    /// `hx-vals` payload asking for the given page.
    pub vals: F,
}

/// Draws the pagination nav.
pub fn render_pagination<F: Fn(u32) -> String>(window: &PageWindow, links: &PageLinks<'_, F>) -> Markup {
    let goto = |page: u32, label: String, text: String| {
        html! {
            button class=(PAGE_BUTTON) aria-label=(label) hx-get=(links.endpoint) hx-target=(links.target) hx-swap="outerHTML" hx-sync={(links.target) ":drop"} hx-indicator="#list_loading" hx-vals=((links.vals)(page)) {(text)}
        }
    };

    let ellipsis = html! {
        span class="px-2 text-gray-500" {"…"}
    };

    html! {
        nav class="flex items-center justify-center mt-6" aria-label="Pagination" {
            @if window.has_previous() {
                (goto(window.current - 1, "Previous page".into(), "Previous".into()))
            } @else {
                button class=(DISABLED_BUTTON) aria-label="Previous page" disabled {"Previous"}
            }

            @if window.show_first() {
                (goto(0, "First page".into(), "1".into()))
                @if window.leading_ellipsis() {
                    (ellipsis)
                }
            }

            @for page in window.pages() {
                @if page == window.current {
                    button class=(CURRENT_BUTTON) aria-label={"Page " (page + 1)} aria-current="page" {(page + 1)}
                } @else {
                    (goto(page, format!("Page {}", page + 1), (page + 1).to_string()))
                }
            }

            @if window.show_last() {
                @if window.trailing_ellipsis() {
                    (ellipsis)
                }
                (goto(window.total - 1, "Last page".into(), window.total.to_string()))
            }

            @if window.has_next() {
                (goto(window.current + 1, "Next page".into(), "Next".into()))
            } @else {
                button class=(DISABLED_BUTTON) aria-label="Next page" disabled {"Next"}
            }
        }
    }
}
