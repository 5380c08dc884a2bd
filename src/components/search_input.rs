use leptos::prelude::*;

/// Search box that resets the caller's page on every keystroke
#[component]
pub fn SearchInput(
    query: ReadSignal<String>,
    set_query: WriteSignal<String>,
    #[prop(optional)] set_page: Option<WriteSignal<usize>>,
    #[prop(into, default = "Search...".to_string())] placeholder: String,
) -> impl IntoView {
    view! {
        <input
            type="search"
            class="search-input"
            placeholder=placeholder
            prop:value=move || query.get()
            on:input=move |ev| {
                set_query.set(event_target_value(&ev));
                if let Some(set_page) = set_page {
                    set_page.set(1);
                }
            }
        />
    }
}
