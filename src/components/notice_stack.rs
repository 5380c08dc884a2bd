//! Notice Stack Component
//!
//! Dismissible banners for request failures and confirmations.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NoticeStack() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="notice-stack">
            <For
                each=move || ctx.notices.get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="alert">
                            <span class="notice-message">{notice.message}</span>
                            <button class="notice-close" title="Dismiss" on:click=move |_| ctx.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
