use crate::shared::icons::icon;
use leptos::prelude::*;

/// "Showing X-Y of Z" summary for a 1-based page.
pub fn range_label(page: usize, page_size: usize, total_count: usize) -> String {
    if total_count == 0 {
        return "No records".to_string();
    }
    let start = (page.max(1) - 1) * page_size + 1;
    let end = (start + page_size - 1).min(total_count);
    format!("Showing {}-{} of {}", start.min(total_count), end, total_count)
}

/// PaginationControls component - first/prev/next/last over 1-based pages
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Size of the filtered subset
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1))
                disabled=at_first
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {}", current_page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=at_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=at_last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <span class="pagination-range">
                {move || range_label(current_page.get(), page_size.get(), total_count.get())}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(1, 10, 0), "No records");
        assert_eq!(range_label(1, 10, 4), "Showing 1-4 of 4");
        assert_eq!(range_label(2, 10, 25), "Showing 11-20 of 25");
        assert_eq!(range_label(3, 10, 25), "Showing 21-25 of 25");
    }
}
