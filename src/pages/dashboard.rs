//! Dashboard page component with business summary.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::billing::format_amount;
use crate::components::{Loading, StatCard};
use crate::config::AppConfig;
use crate::context::{use_app_context, NoticeKind};
use crate::listing::is_low_stock;
use crate::models::{Bill, Customer, Employee};
use crate::reports::{parse_date, profit_summary};
use crate::store::{store_set_inventory, use_app_store, AppStateStoreFields};

/// Newest bills first, at most `limit`
fn recent_bills(bills: &[Bill], limit: usize) -> Vec<Bill> {
    let mut sorted = bills.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let client = expect_context::<ApiClient>();
    let config = expect_context::<AppConfig>();
    let threshold = config.low_stock_threshold;

    let (bills, set_bills) = signal(Vec::<Bill>::new());
    let (customers, set_customers) = signal(Vec::<Customer>::new());
    let (employees, set_employees) = signal(Vec::<Employee>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            match api::list_bills(&client).await {
                Ok(loaded) => set_bills.set(loaded),
                Err(e) => ctx.report_error("Loading bills", &e),
            }
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
            // Headcount is optional; older backends have no employees route
            match api::list_employees(&client).await {
                Ok(loaded) => set_employees.set(loaded),
                Err(e) => log::warn!("Employees unavailable: {}", e),
            }
            set_loading.set(false);
        });
    });

    let low_stock = Memo::new(move |_| {
        store
            .inventory()
            .get()
            .into_iter()
            .filter(|item| is_low_stock(item.quantity, threshold))
            .collect::<Vec<_>>()
    });
    let summary = Memo::new(move |_| bills.with(|b| profit_summary(b, &[])));
    let today_sales = Memo::new(move |_| {
        let today = chrono::Local::now().date_naive();
        bills.with(|b| {
            b.iter()
                .filter(|bill| bill.created_at.as_deref().and_then(parse_date) == Some(today))
                .map(|bill| bill.grand_total)
                .sum::<f64>()
        })
    });

    view! {
        <div class="page dashboard-page">
            <h1>"Dashboard"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <div class="stats-grid">
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().revenue))
                        label="Total Revenue"
                    />
                    <StatCard
                        value=Signal::derive(move || format_amount(today_sales.get()))
                        label="Today's Sales"
                    />
                    <StatCard
                        value=Signal::derive(move || summary.get().bill_count.to_string())
                        label="Bills"
                    />
                    <StatCard
                        value=Signal::derive(move || low_stock.with(|l| l.len()).to_string())
                        label="Low Stock Items"
                        highlight=true
                    />
                    <StatCard
                        value=Signal::derive(move || customers.with(|c| c.len()).to_string())
                        label="Customers"
                    />
                    <StatCard
                        value=Signal::derive(move || employees.with(|e| e.len()).to_string())
                        label="Employees"
                    />
                </div>

                <div class="dashboard-columns">
                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">"Recent Bills"</h2>
                        </div>
                        <table class="data-table">
                            <thead>
                                <tr><th>"Bill"</th><th>"Customer"</th><th>"Type"</th><th>"Total"</th></tr>
                            </thead>
                            <tbody>
                                {move || bills.with(|b| recent_bills(b, 5)).into_iter().map(|bill| view! {
                                    <tr>
                                        <td>{bill.number().to_string()}</td>
                                        <td>{bill.customer_name.clone()}</td>
                                        <td>{bill.bill_type.label()}</td>
                                        <td>{format_amount(bill.grand_total)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <h2 class="card-title">"Low Stock"</h2>
                        </div>
                        <Show
                            when=move || !low_stock.with(|l| l.is_empty())
                            fallback=|| view! { <p class="empty">"All products are sufficiently stocked."</p> }
                        >
                            <ul class="low-stock-list">
                                {move || low_stock.get().into_iter().map(|item| view! {
                                    <li>
                                        <span>{item.name}</span>
                                        <span class="badge warning">{format!("{} left", item.quantity)}</span>
                                    </li>
                                }).collect_view()}
                            </ul>
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(id: &str, created_at: Option<&str>) -> Bill {
        let mut bill: Bill = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        bill.created_at = created_at.map(str::to_string);
        bill
    }

    #[test]
    fn test_recent_bills_newest_first() {
        let bills = vec![
            bill("a", Some("2024-01-01T10:00:00Z")),
            bill("b", None),
            bill("c", Some("2024-03-01T10:00:00Z")),
            bill("d", Some("2024-02-01T10:00:00Z")),
        ];
        let recent = recent_bills(&bills, 2);
        assert_eq!(recent.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["c", "d"]);
    }
}
