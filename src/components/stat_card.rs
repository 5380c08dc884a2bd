//! Statistics card component.

use leptos::prelude::*;

/// Statistics card component.
#[component]
pub fn StatCard(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] label: String,
    #[prop(optional)] highlight: bool,
) -> impl IntoView {
    view! {
        <div class="card stat-card" class:highlight=highlight>
            <div class="stat-value">{move || value.get()}</div>
            <div class="stat-label">{label}</div>
        </div>
    }
}
