//! Cart Panel Component
//!
//! Editable list of pending bill lines backed by the app store.

use leptos::prelude::*;

use crate::billing::format_amount;
use crate::store::{store_update_cart, use_app_store, AppStateStoreFields};

#[component]
pub fn CartPanel() -> impl IntoView {
    let store = use_app_store();
    let lines = move || store.cart().get().lines().to_vec();

    view! {
        <div class="card cart-panel">
            <div class="card-header">
                <h2 class="card-title">
                    {move || format!("Cart ({} items)", store.cart().with(|c| c.item_count()))}
                </h2>
                <Show when=move || !store.cart().with(|c| c.is_empty())>
                    <button class="link-btn" on:click=move |_| store_update_cart(&store, |c| c.clear())>
                        "Clear"
                    </button>
                </Show>
            </div>
            <Show
                when=move || !store.cart().with(|c| c.is_empty())
                fallback=|| view! { <p class="empty">"Cart is empty. Add products from the list."</p> }
            >
                <table class="data-table compact">
                    <thead>
                        <tr><th>"Item"</th><th>"Price"</th><th>"Qty"</th><th>"Total"</th><th></th></tr>
                    </thead>
                    <tbody>
                        <For
                            each=lines
                            key=|line| (line.product_id.clone(), line.quantity)
                            children=move |line| {
                                let id = line.product_id.clone();
                                let remove_id = id.clone();
                                view! {
                                    <tr>
                                        <td>{line.name.clone()}</td>
                                        <td>{format_amount(line.price)}</td>
                                        <td>
                                            <input
                                                type="number"
                                                min="0"
                                                max=line.max_quantity.map(|m| m.to_string())
                                                class="qty-input"
                                                prop:value=line.quantity.to_string()
                                                on:change=move |ev| {
                                                    let qty = event_target_value(&ev).trim().parse::<u32>().unwrap_or(0);
                                                    let id = id.clone();
                                                    store_update_cart(&store, |c| c.set_quantity(&id, qty));
                                                }
                                            />
                                        </td>
                                        <td>{format_amount(line.line_total())}</td>
                                        <td>
                                            <button
                                                class="icon-btn"
                                                title="Remove"
                                                on:click=move |_| {
                                                    let id = remove_id.clone();
                                                    store_update_cart(&store, |c| c.remove(&id));
                                                }
                                            >
                                                "×"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <div class="cart-subtotal">
                    "Subtotal: " {move || format_amount(store.cart().with(|c| c.total()))}
                </div>
            </Show>
        </div>
    }
}
