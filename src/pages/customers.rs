//! Customers Page
//!
//! Customer CRUD with search, pagination and CSV export.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::components::{DeleteConfirmButton, Pagination, SearchInput};
use crate::config::AppConfig;
use crate::context::{use_app_context, NoticeKind};
use crate::export;
use crate::listing::{cmp_text, matches_query, Page};
use crate::models::Customer;
use crate::validation;

#[derive(Debug, Clone, Default, PartialEq)]
struct CustomerForm {
    name: String,
    phone: String,
    email: String,
    address: String,
    gstin: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl CustomerForm {
    fn from_customer(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone().unwrap_or_default(),
            address: c.address.clone().unwrap_or_default(),
            gstin: c.gstin.clone().unwrap_or_default(),
        }
    }

    fn to_customer(&self, id: Option<String>) -> Result<Customer, String> {
        validation::required("Name", &self.name)?;
        validation::phone(&self.phone)?;
        if let Some(email) = optional(&self.email) {
            validation::email(&email)?;
        }
        if let Some(gstin) = optional(&self.gstin) {
            if gstin.len() != 15 || !gstin.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err("GSTIN must be 15 letters or digits".to_string());
            }
        }
        Ok(Customer {
            id: id.unwrap_or_default(),
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: optional(&self.email),
            address: optional(&self.address),
            gstin: optional(&self.gstin).map(|g| g.to_uppercase()),
            created_at: None,
        })
    }
}

fn filter_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    let mut list: Vec<Customer> = customers
        .iter()
        .filter(|c| {
            matches_query(
                [
                    c.name.as_str(),
                    c.phone.as_str(),
                    c.email.as_deref().unwrap_or(""),
                    c.gstin.as_deref().unwrap_or(""),
                ],
                query,
            )
        })
        .cloned()
        .collect();
    list.sort_by(|a, b| cmp_text(&a.name, &b.name));
    list
}

#[component]
pub fn CustomersPage() -> impl IntoView {
    let ctx = use_app_context();
    let client = expect_context::<ApiClient>();
    let page_size = expect_context::<AppConfig>().page_size;

    let (customers, set_customers) = signal(Vec::<Customer>::new());
    let (query, set_query) = signal(String::new());
    let (page, set_page) = signal(1usize);
    let (form, set_form) = signal(CustomerForm::default());
    let (editing, set_editing) = signal::<Option<String>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let load_client = client.clone();
    Effect::new(move |_| {
        let client = load_client.clone();
        spawn_local(async move {
            match api::list_customers(&client).await {
                Ok(loaded) => set_customers.set(loaded),
                Err(e) => ctx.report_error("Loading customers", &e),
            }
        });
    });

    let filtered = Memo::new(move |_| customers.with(|c| filter_customers(c, &query.get())));
    let current_page =
        Memo::new(move |_| filtered.with(|list| Page::paginate(list, page.get(), page_size)));

    let reset_form = move || {
        set_form.set(CustomerForm::default());
        set_editing.set(None);
        set_form_error.set(None);
    };

    let save_client = client.clone();
    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = editing.get();
        let customer = match form.with(|f| f.to_customer(id.clone())) {
            Ok(customer) => customer,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        let client = save_client.clone();
        spawn_local(async move {
            let result = match id {
                Some(_) => api::update_customer(&client, &customer).await,
                None => api::create_customer(&client, &customer).await,
            };
            match result {
                Ok(saved) => {
                    ctx.notify(NoticeKind::Success, format!("Saved {}", saved.name));
                    set_customers.update(|list| match list.iter_mut().find(|c| c.id == saved.id) {
                        Some(existing) => *existing = saved,
                        None => list.push(saved),
                    });
                    reset_form();
                }
                Err(e) => ctx.report_error("Saving customer", &e),
            }
        });
    };

    let delete_client = client.clone();
    let delete_customer = move |id: String| {
        let client = delete_client.clone();
        spawn_local(async move {
            match api::delete_customer(&client, &id).await {
                Ok(()) => {
                    set_customers.update(|list| list.retain(|c| c.id != id));
                    ctx.notify(NoticeKind::Success, "Customer deleted");
                }
                Err(e) => ctx.report_error("Deleting customer", &e),
            }
        });
    };

    let export_customers = move |_| {
        let table = export::customers_table(&filtered.get_untracked());
        if let Err(e) = export::download_csv("customers", &table) {
            log::error!("CSV export failed: {}", e);
            ctx.notify(NoticeKind::Error, "CSV export failed");
        }
    };

    let field = move |label: &'static str,
                      kind: &'static str,
                      get: fn(&CustomerForm) -> String,
                      set: fn(&mut CustomerForm, String)| {
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
        <div class="page customers-page">
            <h1>"Customers"</h1>

            <form class="card customer-form" on:submit=on_save>
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit customer" } else { "Add customer" }}
                </h2>
                <div class="form-grid">
                    {field("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {field("Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {field("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("Address", "text", |f| f.address.clone(), |f, v| f.address = v)}
                    {field("GSTIN", "text", |f| f.gstin.clone(), |f, v| f.gstin = v)}
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
                    <h2 class="card-title">{move || format!("Customers ({})", filtered.with(|l| l.len()))}</h2>
                    <button class="secondary-btn" on:click=export_customers>"Export CSV"</button>
                </div>
                <div class="toolbar">
                    <SearchInput
                        query=query
                        set_query=set_query
                        set_page=set_page
                        placeholder="Search name, phone, email or GSTIN"
                    />
                </div>
                <table class="data-table">
                    <thead>
                        <tr><th>"Name"</th><th>"Phone"</th><th>"Email"</th><th>"GSTIN"</th><th>"Actions"</th></tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || current_page.get().items
                            key=|c| (c.id.clone(), c.name.clone(), c.phone.clone())
                            children=move |customer| {
                                let edit = customer.clone();
                                let id = customer.id.clone();
                                let delete_customer = delete_customer.clone();
                                view! {
                                    <tr>
                                        <td>{customer.name.clone()}</td>
                                        <td>{customer.phone.clone()}</td>
                                        <td>{customer.email.clone().unwrap_or_default()}</td>
                                        <td>{customer.gstin.clone().unwrap_or_default()}</td>
                                        <td class="actions">
                                            <button
                                                class="secondary-btn"
                                                on:click=move |_| {
                                                    set_form.set(CustomerForm::from_customer(&edit));
                                                    set_editing.set(Some(edit.id.clone()));
                                                    set_form_error.set(None);
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton
                                                record=customer.name.clone()
                                                on_confirm=move |_| delete_customer(id.clone())
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

    fn customer(name: &str, phone: &str) -> Customer {
        Customer { id: name.into(), name: name.into(), phone: phone.into(), ..Default::default() }
    }

    #[test]
    fn test_form_validation() {
        let mut form =
            CustomerForm { name: "Asha".into(), phone: "9876543210".into(), ..Default::default() };
        assert!(form.to_customer(None).is_ok());

        form.email = "asha@".into();
        assert!(form.to_customer(None).is_err());
        form.email = "asha@shop.in".into();

        form.gstin = "29abcde1234f1z5".into();
        let saved = form.to_customer(Some("c1".into())).unwrap();
        assert_eq!(saved.gstin.as_deref(), Some("29ABCDE1234F1Z5"));
        assert_eq!(saved.id, "c1");

        form.gstin = "123".into();
        assert!(form.to_customer(None).is_err());

        form.gstin.clear();
        form.phone = "12345".into();
        assert!(form.to_customer(None).is_err());
    }

    #[test]
    fn test_filter_customers() {
        let customers = vec![
            customer("ravi", "9000000001"),
            customer("Anil", "9000000002"),
            customer("Meena", "8000000003"),
        ];
        let all = filter_customers(&customers, "");
        let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Anil", "Meena", "ravi"]);
        assert_eq!(filter_customers(&customers, "9000").len(), 2);
    }
}
