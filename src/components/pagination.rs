//! Pagination Component
//!
//! Prev/next controls with a page indicator. `page` is the clamped page
//! on screen, so stepping always starts from what the user sees.

use leptos::prelude::*;

fn prev_page(shown: usize) -> usize {
    shown.saturating_sub(1).max(1)
}

fn next_page(shown: usize, total_pages: usize) -> usize {
    (shown + 1).min(total_pages.max(1))
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_items: Signal<usize>,
    set_page: WriteSignal<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <button
                disabled=move || page.get() <= 1
                on:click=move |_| set_page.set(prev_page(page.get_untracked()))
            >
                "‹ Prev"
            </button>
            <span class="page-indicator">
                {move || {
                    format!(
                        "Page {} of {} ({} records)",
                        page.get(),
                        total_pages.get(),
                        total_items.get(),
                    )
                }}
            </span>
            <button
                disabled=move || page.get() >= total_pages.get()
                on:click=move |_| {
                    set_page.set(next_page(page.get_untracked(), total_pages.get_untracked()))
                }
            >
                "Next ›"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Page;

    #[test]
    fn test_prev_after_list_shrinks() {
        // raw signal still says 3 after the list dropped to two pages
        let items: Vec<u32> = (0..15).collect();
        let shown = Page::paginate(&items, 3, 10).page;
        assert_eq!(shown, 2);

        let raw = prev_page(shown);
        assert_eq!(Page::paginate(&items, raw, 10).page, 1);
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(prev_page(1), 1);
        assert_eq!(next_page(2, 2), 2);
        assert_eq!(next_page(1, 2), 2);
        assert_eq!(next_page(1, 0), 1);
    }
}
