//! Sales Page
//!
//! Product picker, cart, bill form and the bill history table.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::billing::{format_amount, BillDraft, BillTotals, BillType, Charges};
use crate::components::{CartPanel, DeleteConfirmButton, Pagination, SearchInput};
use crate::config::{AppConfig, FormDefaults};
use crate::context::{use_app_context, NoticeKind};
use crate::export;
use crate::listing::{is_low_stock, matches_query, Page};
use crate::models::{Bill, Customer, InventoryItem};
use crate::storage::BrowserStorage;
use crate::store::{
    store_apply_sale, store_set_inventory, store_update_cart, use_app_store, AppStateStoreFields,
};
use crate::validation;

const PAYMENT_METHODS: &[(&str, &str)] =
    &[("cash", "Cash"), ("upi", "UPI"), ("card", "Card"), ("credit", "Credit")];

/// Products matching the picker search, in-stock first
fn pickable_products(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
    let mut matches: Vec<InventoryItem> = items
        .iter()
        .filter(|i| {
            let fields = [i.name.as_str(), i.category.as_str(), i.sku.as_deref().unwrap_or("")];
            matches_query(fields, query)
        })
        .cloned()
        .collect();
    matches.sort_by_key(|i| (i.quantity <= 0, i.name.to_lowercase()));
    matches
}

/// Bills matching the history search, newest first
fn filter_bills(bills: &[Bill], query: &str, bill_type: Option<BillType>) -> Vec<Bill> {
    let mut matches: Vec<Bill> = bills
        .iter()
        .filter(|b| bill_type.map_or(true, |t| b.bill_type == t))
        .filter(|b| {
            matches_query(
                [b.number(), b.customer_name.as_str(), b.customer_phone.as_deref().unwrap_or("")],
                query,
            )
        })
        .cloned()
        .collect();
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matches
}

/// Date part of the bill timestamp for the history table
fn bill_date(bill: &Bill) -> String {
    bill.created_at.as_deref().unwrap_or_default().chars().take(10).collect()
}

/// Blank or unparsable form amounts count as zero in the live preview
fn amount_or_zero(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Rate field: blank means "use the default"
fn parse_rate(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

#[component]
pub fn SalesPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<ApiClient>();
    let config = expect_context::<AppConfig>();
    let (page_size, threshold, default_rate) =
        (config.page_size, config.low_stock_threshold, config.default_gst_rate);
    let defaults = FormDefaults::load(&BrowserStorage);

    let (bills, set_bills) = signal(Vec::<Bill>::new());
    let (customers, set_customers) = signal(Vec::<Customer>::new());
    let (product_query, set_product_query) = signal(String::new());

    // Bill form
    let (customer_id, set_customer_id) = signal::<Option<String>>(None);
    let (customer_name, set_customer_name) = signal(String::new());
    let (customer_phone, set_customer_phone) = signal(String::new());
    let (bill_type, set_bill_type) = signal(defaults.bill_type);
    let (gst_rate, set_gst_rate) = signal(defaults.gst_rate.to_string());
    let (discount, set_discount) = signal(String::new());
    let (labour, set_labour) = signal(defaults.labour.to_string());
    let (transport, set_transport) = signal(defaults.transport.to_string());
    let (payment_method, set_payment_method) = signal(defaults.payment_method.clone());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    // Bill history
    let (bill_query, set_bill_query) = signal(String::new());
    let (type_filter, set_type_filter) = signal::<Option<BillType>>(None);
    let (page, set_page) = signal(1usize);

    let load_client = client.clone();
    Effect::new(move |_| {
        let client = load_client.clone();
        spawn_local(async move {
            match api::list_inventory_or_cached(&client).await {
                Ok((items, cached)) => {
                    if cached {
                        ctx.notify(
                            NoticeKind::Warning,
                            "Backend unreachable, showing cached inventory",
                        );
                    }
                    store_set_inventory(&store, items, cached);
                }
                Err(e) => ctx.report_error("Loading inventory", &e),
            }
            match api::list_customers(&client).await {
                Ok(loaded) => set_customers.set(loaded),
                Err(e) => ctx.report_error("Loading customers", &e),
            }
            match api::list_bills(&client).await {
                Ok(loaded) => set_bills.set(loaded),
                Err(e) => ctx.report_error("Loading bills", &e),
            }
        });
    });

    let products = Memo::new(move |_| {
        store.inventory().with(|items| pickable_products(items, &product_query.get()))
    });

    let totals = Memo::new(move |_| {
        let charges = Charges {
            discount: amount_or_zero(&discount.get()),
            labour: amount_or_zero(&labour.get()),
            transport: amount_or_zero(&transport.get()),
        };
        let rate = parse_rate(&gst_rate.get());
        store.cart().with(|cart| BillTotals::compute(cart.lines(), bill_type.get(), rate, charges))
    });

    let bill_page = Memo::new(move |_| {
        let filtered = bills.with(|b| filter_bills(b, &bill_query.get(), type_filter.get()));
        Page::paginate(&filtered, page.get(), page_size)
    });

    let on_customer_select = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        if id.is_empty() {
            set_customer_id.set(None);
            return;
        }
        if let Some(customer) = customers.with(|list| list.iter().find(|c| c.id == id).cloned()) {
            set_customer_name.set(customer.name);
            set_customer_phone.set(customer.phone);
            set_customer_id.set(Some(customer.id));
        }
    };

    let submit_client = client.clone();
    let create_bill = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let charges = match (
            validation::optional_amount("Discount", &discount.get()),
            validation::optional_amount("Labour", &labour.get()),
            validation::optional_amount("Transport", &transport.get()),
        ) {
            (Ok(discount), Ok(labour), Ok(transport)) => Charges { discount, labour, transport },
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        let phone = customer_phone.get();
        if !phone.trim().is_empty() {
            if let Err(e) = validation::phone(&phone) {
                set_form_error.set(Some(e));
                return;
            }
        }

        let draft = BillDraft {
            customer_id: customer_id.get(),
            customer_name: customer_name.get(),
            customer_phone: Some(phone),
            bill_type: bill_type.get(),
            gst_rate: parse_rate(&gst_rate.get()),
            charges,
            payment_method: payment_method.get(),
        };
        let lines = store.cart().with(|c| c.lines().to_vec());
        if let Err(e) = draft.validate(&lines) {
            set_form_error.set(Some(e));
            return;
        }
        set_form_error.set(None);

        FormDefaults {
            bill_type: draft.bill_type,
            gst_rate: draft.gst_rate.unwrap_or(default_rate),
            labour: charges.labour,
            transport: charges.transport,
            payment_method: draft.payment_method.clone(),
        }
        .save(&BrowserStorage);

        let request = draft.into_request(&lines);
        let sold: Vec<(String, u32)> =
            lines.iter().map(|l| (l.product_id.clone(), l.quantity)).collect();
        let client = submit_client.clone();
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_bill(&client, &request).await {
                Ok(bill) => {
                    log::info!("Created bill {} for {}", bill.number(), bill.customer_name);
                    ctx.notify(NoticeKind::Success, format!("Bill {} created", bill.number()));
                    set_bills.update(|list| list.insert(0, bill));
                    store_apply_sale(&store, &sold);
                    store_update_cart(&store, |c| c.clear());
                    set_customer_id.set(None);
                    set_customer_name.set(String::new());
                    set_customer_phone.set(String::new());
                    set_discount.set(String::new());
                }
                Err(e) => ctx.report_error("Creating bill", &e),
            }
            set_submitting.set(false);
        });
    };

    let pdf_client = client.clone();
    let download_pdf = move |bill: Bill| {
        let client = pdf_client.clone();
        spawn_local(async move {
            match api::download_bill_pdf(&client, &bill.id).await {
                Ok(bytes) => {
                    let filename = format!("bill-{}.pdf", bill.number());
                    if let Err(e) = export::download_bytes(&filename, "application/pdf", &bytes) {
                        log::error!("PDF download failed: {}", e);
                        ctx.notify(NoticeKind::Error, "Could not save the PDF");
                    }
                }
                Err(e) => ctx.report_error("Downloading bill PDF", &e),
            }
        });
    };

    let delete_client = client.clone();
    let delete_bill = move |id: String| {
        let client = delete_client.clone();
        spawn_local(async move {
            match api::delete_bill(&client, &id).await {
                Ok(()) => {
                    set_bills.update(|list| list.retain(|b| b.id != id));
                    ctx.notify(NoticeKind::Success, "Bill deleted");
                }
                Err(e) => ctx.report_error("Deleting bill", &e),
            }
        });
    };

    let export_bills = move |_| {
        let filtered = bills.with(|b| {
            filter_bills(b, &bill_query.get_untracked(), type_filter.get_untracked())
        });
        if let Err(e) = export::download_csv("bills", &export::bills_table(&filtered)) {
            log::error!("CSV export failed: {}", e);
            ctx.notify(NoticeKind::Error, "CSV export failed");
        }
    };

    view! {
        <div class="page sales-page">
            <h1>"Sales"</h1>

            <div class="sales-layout">
                // Left: product picker
                <div class="card product-picker">
                    <div class="card-header">
                        <h2 class="card-title">"Products"</h2>
                        <Show when=move || store.inventory_is_cached().get()>
                            <span class="badge warning">"cached"</span>
                        </Show>
                    </div>
                    <SearchInput
                        query=product_query
                        set_query=set_product_query
                        placeholder="Search name, category or SKU"
                    />
                    <ul class="picker-list">
                        <For
                            each=move || products.get()
                            key=|item| (item.id.clone(), item.quantity)
                            children=move |item| {
                                let low = is_low_stock(item.quantity, threshold);
                                let out = item.quantity <= 0;
                                let product = item.clone();
                                view! {
                                    <li class="picker-row" class:out-of-stock=out>
                                        <div class="picker-info">
                                            <span class="picker-name">{item.name.clone()}</span>
                                            <span class="picker-meta">
                                                {format_amount(item.price)}
                                                " · "
                                                {format!("{} in stock", item.quantity)}
                                            </span>
                                        </div>
                                        <Show when=move || low>
                                            <span class="badge warning">"Low"</span>
                                        </Show>
                                        <button
                                            class="add-btn"
                                            disabled=out
                                            on:click=move |_| {
                                                let product = product.clone();
                                                store_update_cart(&store, |c| {
                                                    if !c.add(&product, 1) {
                                                        let message = format!("No more stock for {}", product.name);
                                                        ctx.notify(NoticeKind::Warning, message);
                                                    }
                                                });
                                            }
                                        >
                                            "Add"
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>

                // Right: cart and bill form
                <div class="billing-column">
                    <CartPanel />

                    <form class="card bill-form" on:submit=create_bill>
                        <div class="form-row">
                            <label>
                                "Existing customer"
                                <select on:change=on_customer_select>
                                    <option value="" selected=move || customer_id.get().is_none()>
                                        "Walk-in / new"
                                    </option>
                                    {move || customers.get().into_iter().map(|c| {
                                        let id = c.id.clone();
                                        let selected =
                                            move || customer_id.get().as_deref() == Some(id.as_str());
                                        let text = format!("{} ({})", c.name, c.phone);
                                        view! { <option value=c.id.clone() selected=selected>{text}</option> }
                                    }).collect_view()}
                                </select>
                            </label>
                        </div>
                        <div class="form-row">
                            <label>
                                "Customer name"
                                <input
                                    type="text"
                                    prop:value=move || customer_name.get()
                                    on:input=move |ev| set_customer_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Phone"
                                <input
                                    type="tel"
                                    prop:value=move || customer_phone.get()
                                    on:input=move |ev| set_customer_phone.set(event_target_value(&ev))
                                />
                            </label>
                        </div>

                        <div class="form-row">
                            <div class="type-selector">
                                {[BillType::Gst, BillType::NonGst].into_iter().map(|t| view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            if bill_type.get() == t { "type-btn active" } else { "type-btn" }
                                        }
                                        on:click=move |_| set_bill_type.set(t)
                                    >
                                        {t.label()}
                                    </button>
                                }).collect_view()}
                            </div>
                            <Show when=move || bill_type.get() == BillType::Gst>
                                <label>
                                    "GST %"
                                    <input
                                        type="number"
                                        min="0"
                                        max="100"
                                        step="0.01"
                                        placeholder=default_rate.to_string()
                                        prop:value=move || gst_rate.get()
                                        on:input=move |ev| set_gst_rate.set(event_target_value(&ev))
                                    />
                                </label>
                            </Show>
                        </div>

                        <div class="form-row">
                            <label>
                                "Discount"
                                <input type="number" min="0" step="0.01"
                                    prop:value=move || discount.get()
                                    on:input=move |ev| set_discount.set(event_target_value(&ev)) />
                            </label>
                            <label>
                                "Labour"
                                <input type="number" min="0" step="0.01"
                                    prop:value=move || labour.get()
                                    on:input=move |ev| set_labour.set(event_target_value(&ev)) />
                            </label>
                            <label>
                                "Transport"
                                <input type="number" min="0" step="0.01"
                                    prop:value=move || transport.get()
                                    on:input=move |ev| set_transport.set(event_target_value(&ev)) />
                            </label>
                            <label>
                                "Payment"
                                <select on:change=move |ev| set_payment_method.set(event_target_value(&ev))>
                                    {PAYMENT_METHODS.iter().map(|(value, label)| view! {
                                        <option value=*value selected=move || payment_method.get() == *value>
                                            {*label}
                                        </option>
                                    }).collect_view()}
                                </select>
                            </label>
                        </div>

                        <dl class="totals">
                            <dt>"Subtotal"</dt><dd>{move || format_amount(totals.get().subtotal)}</dd>
                            <dt>{move || format!("Tax ({}%)", totals.get().rate)}</dt>
                            <dd>{move || format_amount(totals.get().tax)}</dd>
                            <dt>"Discount"</dt>
                            <dd>{move || format!("−{}", format_amount(totals.get().discount))}</dd>
                            <dt>"Labour + Transport"</dt>
                            <dd>
                                {move || {
                                    let t = totals.get();
                                    format_amount(t.labour + t.transport)
                                }}
                            </dd>
                            <dt class="grand">"Grand Total"</dt>
                            <dd class="grand">{move || format_amount(totals.get().grand_total)}</dd>
                        </dl>

                        {move || {
                            form_error.get().map(|message| view! { <p class="form-error">{message}</p> })
                        }}

                        <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Saving..." } else { "Create Bill" }}
                        </button>
                    </form>
                </div>
            </div>

            // Bill history
            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">"Bills"</h2>
                    <button class="secondary-btn" on:click=export_bills>"Export CSV"</button>
                </div>
                <div class="toolbar">
                    <SearchInput
                        query=bill_query
                        set_query=set_bill_query
                        set_page=set_page
                        placeholder="Bill no., customer or phone"
                    />
                    <select on:change=move |ev| {
                        set_page.set(1);
                        set_type_filter.set(match event_target_value(&ev).as_str() {
                            "" => None,
                            label => Some(BillType::from_label(label)),
                        });
                    }>
                        <option value="">"All types"</option>
                        <option value="GST">"GST"</option>
                        <option value="NON-GST">"NON-GST"</option>
                    </select>
                </div>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Bill"</th><th>"Date"</th><th>"Customer"</th><th>"Type"</th>
                            <th>"Items"</th><th>"Grand Total"</th><th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || bill_page.get().items
                            key=|bill| bill.id.clone()
                            children=move |bill| {
                                let pdf_bill = bill.clone();
                                let id = bill.id.clone();
                                let download_pdf = download_pdf.clone();
                                let delete_bill = delete_bill.clone();
                                view! {
                                    <tr>
                                        <td>{bill.number().to_string()}</td>
                                        <td>{bill_date(&bill)}</td>
                                        <td>{bill.customer_name.clone()}</td>
                                        <td>{bill.bill_type.label()}</td>
                                        <td>{bill.items.iter().map(|i| i.quantity).sum::<u32>()}</td>
                                        <td>{format_amount(bill.grand_total)}</td>
                                        <td class="actions">
                                            <button
                                                class="secondary-btn"
                                                on:click=move |_| download_pdf(pdf_bill.clone())
                                            >
                                                "PDF"
                                            </button>
                                            <DeleteConfirmButton
                                                record=bill.number().to_string()
                                                on_confirm=move |_| delete_bill(id.clone())
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Pagination
                    page=Signal::derive(move || bill_page.get().page)
                    total_pages=Signal::derive(move || bill_page.get().total_pages)
                    total_items=Signal::derive(move || bill_page.get().total_items)
                    set_page=set_page
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, quantity: i64) -> InventoryItem {
        InventoryItem { id: id.into(), name: name.into(), quantity, ..Default::default() }
    }

    fn bill(id: &str, customer: &str, bill_type: BillType, created_at: &str) -> Bill {
        let mut bill: Bill = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        bill.customer_name = customer.into();
        bill.bill_type = bill_type;
        bill.created_at = Some(created_at.into());
        bill
    }

    #[test]
    fn test_pickable_products_in_stock_first() {
        let items = vec![item("1", "Zinc sheet", 5), item("2", "Angle", 0), item("3", "bolt", 2)];
        let picked = pickable_products(&items, "");
        assert_eq!(picked.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["3", "1", "2"]);
        assert_eq!(pickable_products(&items, "ZINC").len(), 1);
    }

    #[test]
    fn test_filter_bills() {
        let bills = vec![
            bill("b1", "Ravi", BillType::Gst, "2024-01-01"),
            bill("b2", "Meena", BillType::NonGst, "2024-02-01"),
            bill("b3", "Ravindra", BillType::NonGst, "2024-03-01"),
        ];
        let ravi = filter_bills(&bills, "ravi", None);
        assert_eq!(ravi.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["b3", "b1"]);
        let non_gst = filter_bills(&bills, "", Some(BillType::NonGst));
        assert_eq!(non_gst.len(), 2);
        assert_eq!(filter_bills(&bills, "b2", None)[0].customer_name, "Meena");
    }

    #[test]
    fn test_bill_date() {
        let dated = bill("b1", "Ravi", BillType::Gst, "2024-03-02T10:00:00Z");
        assert_eq!(bill_date(&dated), "2024-03-02");
        let mut undated = bill("b2", "Ravi", BillType::Gst, "");
        undated.created_at = None;
        assert_eq!(bill_date(&undated), "");
    }

    #[test]
    fn test_form_number_parsing() {
        assert_eq!(amount_or_zero(" 12.5 "), 12.5);
        assert_eq!(amount_or_zero("abc"), 0.0);
        assert_eq!(parse_rate(""), None);
        assert_eq!(parse_rate("5"), Some(5.0));
    }
}
