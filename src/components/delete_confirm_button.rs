//! Delete Confirm Button Component
//!
//! Two-step delete for table rows: the first click arms the row, the
//! second one fires `on_confirm`. An armed row disarms itself after a few
//! seconds so a stray click later cannot delete a record.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DISARM_AFTER_MS: u32 = 4_000;

fn prompt_text(record: Option<&str>) -> String {
    match record.map(str::trim).filter(|r| !r.is_empty()) {
        Some(record) => format!("Delete {}?", record),
        None => "Delete this record?".to_string(),
    }
}

/// Row-level delete with inline confirmation
///
/// `record` names the row in the prompt, e.g. a bill number or product name.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(optional, into)] record: Option<String>,
) -> impl IntoView {
    let (armed, set_armed) = signal(false);
    let prompt = prompt_text(record.as_deref());

    let arm = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        set_armed.set(true);
        Timeout::new(DISARM_AFTER_MS, move || set_armed.set(false)).forget();
    };

    move || {
        if armed.get() {
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{prompt.clone()}</span>
                    <button
                        class="confirm-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_armed.set(false);
                            on_confirm.run(());
                        }
                    >
                        "Yes"
                    </button>
                    <button
                        class="cancel-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_armed.set(false);
                        }
                    >
                        "No"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! { <button class="secondary-btn danger" on:click=arm>"Delete"</button> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        assert_eq!(prompt_text(Some("INV-0042")), "Delete INV-0042?");
        assert_eq!(prompt_text(Some("  ")), "Delete this record?");
        assert_eq!(prompt_text(None), "Delete this record?");
    }
}
