//! Sidebar Component
//!
//! Section navigation plus the signed-in user and logout.

use leptos::prelude::*;

use super::NavPage;
use crate::context::use_app_context;

#[component]
pub fn Sidebar(
    current_page: ReadSignal<NavPage>,
    set_current_page: WriteSignal<NavPage>,
) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <aside class="sidebar">
            <div class="nav-brand">"Retail Console"</div>
            <nav>
                <ul class="nav-links">
                    {move || NavPage::visible(ctx.is_admin()).into_iter().map(|page| {
                        let is_active = move || current_page.get() == page;
                        view! {
                            <li>
                                <button
                                    class=move || {
                                        if is_active() { "nav-link active" } else { "nav-link" }
                                    }
                                    on:click=move |_| set_current_page.set(page)
                                >
                                    <span class="nav-icon">{page.icon()}</span>
                                    {page.label()}
                                </button>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            </nav>
            <div class="sidebar-footer">
                <span class="user-name">
                    {move || ctx.current_user.get().map(|u| u.name).unwrap_or_default()}
                </span>
                <button class="logout-btn" on:click=move |_| ctx.logout()>"Logout"</button>
            </div>
        </aside>
    }
}
