//! Products Page
//!
//! Inventory CRUD with search, filters, sorting and CSV export.

use std::cmp::Ordering;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::billing::format_amount;
use crate::components::{DeleteConfirmButton, Pagination, SearchInput};
use crate::config::AppConfig;
use crate::context::{use_app_context, NoticeKind};
use crate::export;
use crate::listing::{cmp_f64, cmp_text, is_low_stock, matches_query, Page, SortOrder};
use crate::models::{Category, InventoryItem};
use crate::store::{
    store_remove_inventory_item, store_set_inventory, store_upsert_inventory_item, use_app_store,
    AppStateStoreFields,
};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Name,
    Price,
    Stock,
}

/// Raw form fields
#[derive(Debug, Clone, Default, PartialEq)]
struct ProductForm {
    name: String,
    category: String,
    price: String,
    quantity: String,
    sku: String,
    hsn_code: String,
    gst_rate: String,
    description: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl ProductForm {
    fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            sku: item.sku.clone().unwrap_or_default(),
            hsn_code: item.hsn_code.clone().unwrap_or_default(),
            gst_rate: item.gst_rate.map(|r| r.to_string()).unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    fn to_item(&self, id: Option<String>) -> Result<InventoryItem, String> {
        validation::required("Name", &self.name)?;
        let price = validation::positive_amount("Price", &self.price)?;
        let quantity = validation::non_negative_int("Quantity", &self.quantity)?;
        let gst_rate = match optional(&self.gst_rate) {
            Some(rate) => match rate.parse::<f64>() {
                Ok(r) if (0.0..=100.0).contains(&r) => Some(r),
                _ => return Err("GST rate must be between 0 and 100".to_string()),
            },
            None => None,
        };

        Ok(InventoryItem {
            id: id.unwrap_or_default(),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price,
            quantity,
            sku: optional(&self.sku),
            hsn_code: optional(&self.hsn_code),
            gst_rate,
            description: optional(&self.description),
        })
    }
}

/// Filter then sort the inventory for display
fn visible_products(
    items: &[InventoryItem],
    query: &str,
    category: &str,
    low_stock_only: bool,
    threshold: i64,
    sort: (SortKey, SortOrder),
) -> Vec<InventoryItem> {
    let mut list: Vec<InventoryItem> = items
        .iter()
        .filter(|i| category.is_empty() || i.category.eq_ignore_ascii_case(category))
        .filter(|i| !low_stock_only || is_low_stock(i.quantity, threshold))
        .filter(|i| {
            matches_query(
                [
                    i.name.as_str(),
                    i.category.as_str(),
                    i.sku.as_deref().unwrap_or(""),
                    i.hsn_code.as_deref().unwrap_or(""),
                ],
                query,
            )
        })
        .cloned()
        .collect();

    let (key, order) = sort;
    list.sort_by(|a, b| {
        let ordering: Ordering = match key {
            SortKey::Name => cmp_text(&a.name, &b.name),
            SortKey::Price => cmp_f64(a.price, b.price),
            SortKey::Stock => a.quantity.cmp(&b.quantity),
        };
        order.apply(ordering)
    });
    list
}

/// Distinct categories from the backend list and the products themselves
fn category_options(categories: &[Category], items: &[InventoryItem]) -> Vec<String> {
    let mut names: Vec<String> = categories
        .iter()
        .map(|c| c.name.trim().to_string())
        .chain(items.iter().map(|i| i.category.trim().to_string()))
        .filter(|n| !n.is_empty())
        .collect();
    names.sort_by(|a, b| cmp_text(a, b));
    names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    names
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<ApiClient>();
    let config = expect_context::<AppConfig>();
    let (page_size, threshold) = (config.page_size, config.low_stock_threshold);

    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (query, set_query) = signal(String::new());
    let (category_filter, set_category_filter) = signal(String::new());
    let (low_stock_only, set_low_stock_only) = signal(false);
    let (sort, set_sort) = signal((SortKey::Name, SortOrder::Asc));
    let (page, set_page) = signal(1usize);

    let (form, set_form) = signal(ProductForm::default());
    let (editing, set_editing) = signal::<Option<String>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

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
            match api::list_categories(&client).await {
                Ok(loaded) => set_categories.set(loaded),
                Err(e) => log::warn!("Categories unavailable: {}", e),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        store.inventory().with(|items| {
            visible_products(
                items,
                &query.get(),
                &category_filter.get(),
                low_stock_only.get(),
                threshold,
                sort.get(),
            )
        })
    });
    let current_page =
        Memo::new(move |_| filtered.with(|list| Page::paginate(list, page.get(), page_size)));
    let options = Memo::new(move |_| {
        categories.with(|c| store.inventory().with(|items| category_options(c, items)))
    });

    let reset_form = move || {
        set_form.set(ProductForm::default());
        set_editing.set(None);
        set_form_error.set(None);
    };

    let save_client = client.clone();
    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = editing.get();
        let item = match form.with(|f| f.to_item(id.clone())) {
            Ok(item) => item,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        let client = save_client.clone();
        spawn_local(async move {
            let result = match id {
                Some(_) => api::update_inventory_item(&client, &item).await,
                None => api::create_inventory_item(&client, &item).await,
            };
            match result {
                Ok(saved) => {
                    ctx.notify(NoticeKind::Success, format!("Saved {}", saved.name));
                    store_upsert_inventory_item(&store, saved);
                    reset_form();
                }
                Err(e) => ctx.report_error("Saving product", &e),
            }
        });
    };

    let delete_client = client.clone();
    let delete_product = move |id: String| {
        let client = delete_client.clone();
        spawn_local(async move {
            match api::delete_inventory_item(&client, &id).await {
                Ok(()) => {
                    store_remove_inventory_item(&store, &id);
                    ctx.notify(NoticeKind::Success, "Product deleted");
                }
                Err(e) => ctx.report_error("Deleting product", &e),
            }
        });
    };

    let toggle_sort = move |key: SortKey| {
        set_sort.update(|(current, order)| {
            if *current == key {
                *order = order.toggle();
            } else {
                *current = key;
                *order = SortOrder::Asc;
            }
        });
    };
    let sort_header = move |key: SortKey, label: &'static str| {
        view! {
            <th class="sortable" on:click=move |_| toggle_sort(key)>
                {label}
                {move || {
                    let (current, order) = sort.get();
                    if current == key { order.arrow() } else { "" }
                }}
            </th>
        }
    };

    let export_products = move |_| {
        let rows = filtered.get_untracked();
        if let Err(e) = export::download_csv("products", &export::products_table(&rows)) {
            log::error!("CSV export failed: {}", e);
            ctx.notify(NoticeKind::Error, "CSV export failed");
        }
    };

    // Text field bound to one member of the form struct
    let field = move |label: &'static str,
                      kind: &'static str,
                      get: fn(&ProductForm) -> String,
                      set: fn(&mut ProductForm, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        set_form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="page products-page">
            <h1>"Products"</h1>

            <form class="card product-form" on:submit=on_save>
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit product" } else { "Add product" }}
                </h2>
                <div class="form-grid">
                    {field("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    <label>
                        "Category"
                        <input
                            type="text"
                            list="category-options"
                            prop:value=move || form.with(|f| f.category.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_form.update(|f| f.category = value);
                            }
                        />
                        <datalist id="category-options">
                            {move || options.get().into_iter().map(|name| view! { <option value=name></option> }).collect_view()}
                        </datalist>
                    </label>
                    {field("Price", "number", |f| f.price.clone(), |f, v| f.price = v)}
                    {field("Quantity", "number", |f| f.quantity.clone(), |f, v| f.quantity = v)}
                    {field("SKU", "text", |f| f.sku.clone(), |f, v| f.sku = v)}
                    {field("HSN code", "text", |f| f.hsn_code.clone(), |f, v| f.hsn_code = v)}
                    {field("GST %", "number", |f| f.gst_rate.clone(), |f, v| f.gst_rate = v)}
                    {field("Description", "text", |f| f.description.clone(), |f, v| f.description = v)}
                </div>
                {move || {
                    form_error.get().map(|message| view! { <p class="form-error">{message}</p> })
                }}
                <div class="form-actions">
                    <button type="submit" class="primary-btn">
                        {move || if editing.get().is_some() { "Update" } else { "Add" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="secondary-btn" on:click=move |_| reset_form()>
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>

            <div class="card">
                <div class="card-header">
                    <h2 class="card-title">
                        {move || format!("Inventory ({})", filtered.with(|l| l.len()))}
                    </h2>
                    <Show when=move || store.inventory_is_cached().get()>
                        <span class="badge warning">"Showing cached inventory"</span>
                    </Show>
                    <button class="secondary-btn" on:click=export_products>"Export CSV"</button>
                </div>
                <div class="toolbar">
                    <SearchInput
                        query=query
                        set_query=set_query
                        set_page=set_page
                        placeholder="Search name, SKU or HSN"
                    />
                    <select on:change=move |ev| {
                        set_page.set(1);
                        set_category_filter.set(event_target_value(&ev));
                    }>
                        <option value="">"All categories"</option>
                        {move || options.get().into_iter().map(|name| view! {
                            <option value=name.clone()>{name.clone()}</option>
                        }).collect_view()}
                    </select>
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || low_stock_only.get()
                            on:change=move |ev| {
                                set_page.set(1);
                                set_low_stock_only.set(event_target_checked(&ev));
                            }
                        />
                        {format!("Low stock only (< {})", threshold)}
                    </label>
                </div>

                <table class="data-table">
                    <thead>
                        <tr>
                            {sort_header(SortKey::Name, "Name")}
                            <th>"Category"</th>
                            {sort_header(SortKey::Price, "Price")}
                            {sort_header(SortKey::Stock, "Stock")}
                            <th>"GST %"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || current_page.get().items
                            key=|item| {
                                (item.id.clone(), item.quantity, item.price.to_bits(), item.name.clone())
                            }
                            children=move |item| {
                                let low = is_low_stock(item.quantity, threshold);
                                let edit_item = item.clone();
                                let id = item.id.clone();
                                let delete_product = delete_product.clone();
                                view! {
                                    <tr class:low-stock=low>
                                        <td>{item.name.clone()}</td>
                                        <td>{item.category.clone()}</td>
                                        <td>{format_amount(item.price)}</td>
                                        <td>
                                            {item.quantity}
                                            <Show when=move || low>
                                                <span class="badge warning">"Low"</span>
                                            </Show>
                                        </td>
                                        <td>
                                            {item.gst_rate.map(|r| format!("{}%", r)).unwrap_or_else(|| "-".to_string())}
                                        </td>
                                        <td class="actions">
                                            <button
                                                class="secondary-btn"
                                                on:click=move |_| {
                                                    set_form.set(ProductForm::from_item(&edit_item));
                                                    set_editing.set(Some(edit_item.id.clone()));
                                                    set_form_error.set(None);
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton
                                                record=item.name.clone()
                                                on_confirm=move |_| delete_product(id.clone())
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Pagination
                    page=Signal::derive(move || current_page.get().page)
                    total_pages=Signal::derive(move || current_page.get().total_pages)
                    total_items=Signal::derive(move || current_page.get().total_items)
                    set_page=set_page
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, price: f64, quantity: i64) -> InventoryItem {
        InventoryItem {
            id: name.into(),
            name: name.into(),
            category: category.into(),
            price,
            quantity,
            ..Default::default()
        }
    }

    fn names(list: &[InventoryItem]) -> Vec<&str> {
        list.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_form_validation() {
        let mut form = ProductForm {
            name: "Cement".into(),
            price: "350".into(),
            quantity: "40".into(),
            gst_rate: "28".into(),
            ..Default::default()
        };
        let item = form.to_item(Some("x1".into())).unwrap();
        assert_eq!(item.id, "x1");
        assert_eq!(item.gst_rate, Some(28.0));
        assert_eq!(item.sku, None);

        form.gst_rate = "180".into();
        assert!(form.to_item(None).is_err());
        form.gst_rate.clear();
        form.quantity = "-2".into();
        assert!(form.to_item(None).is_err());
        form.quantity = "2".into();
        form.price = "0".into();
        assert!(form.to_item(None).is_err());
    }

    #[test]
    fn test_form_roundtrip_from_item() {
        let original =
            InventoryItem { sku: Some("SKU-1".into()), ..item("Pipe", "Plumbing", 120.0, 8) };
        let rebuilt = ProductForm::from_item(&original).to_item(Some("Pipe".into())).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_visible_products_filters_and_sorts() {
        let items = vec![
            item("Tap", "Plumbing", 250.0, 30),
            item("bucket", "Hardware", 90.0, 3),
            item("Valve", "plumbing", 400.0, 9),
        ];
        let by_name = visible_products(&items, "", "", false, 10, (SortKey::Name, SortOrder::Asc));
        assert_eq!(names(&by_name), vec!["bucket", "Tap", "Valve"]);

        let by_price = (SortKey::Price, SortOrder::Desc);
        let plumbing = visible_products(&items, "", "Plumbing", false, 10, by_price);
        assert_eq!(names(&plumbing), vec!["Valve", "Tap"]);

        let low = visible_products(&items, "", "", true, 10, (SortKey::Stock, SortOrder::Asc));
        assert_eq!(names(&low), vec!["bucket", "Valve"]);

        let tap = visible_products(&items, "tap", "", false, 10, (SortKey::Name, SortOrder::Asc));
        assert_eq!(names(&tap), vec!["Tap"]);
    }

    #[test]
    fn test_category_options_dedup() {
        let categories = vec![Category { name: "Hardware".into(), ..Default::default() }];
        let items =
            vec![item("a", "hardware", 1.0, 1), item("b", "Paint", 1.0, 1), item("c", "", 1.0, 1)];
        assert_eq!(
            category_options(&categories, &items),
            vec!["Hardware".to_string(), "Paint".to_string()]
        );
    }
}
