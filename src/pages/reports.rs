//! Reports page component with sales and expense charts.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::billing::format_amount;
use crate::components::{BarChart, Loading, StatCard};
use crate::context::use_app_context;
use crate::models::{Bill, Expense};
use crate::reports::{
    daily_sales, expenses_by_category, monthly_sales, profit_summary, top_products,
};

const MONTH_OPTIONS: &[u32] = &[3, 6, 12];

#[component]
pub fn ReportsPage() -> impl IntoView {
    let ctx = use_app_context();
    let client = expect_context::<ApiClient>();

    let (bills, set_bills) = signal(Vec::<Bill>::new());
    let (expenses, set_expenses) = signal(Vec::<Expense>::new());
    let (months, set_months) = signal(6u32);
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let client = client.clone();
        spawn_local(async move {
            match api::list_bills(&client).await {
                Ok(loaded) => set_bills.set(loaded),
                Err(e) => ctx.report_error("Loading bills", &e),
            }
            match api::list_expenses(&client).await {
                Ok(loaded) => set_expenses.set(loaded),
                Err(e) => ctx.report_error("Loading expenses", &e),
            }
            set_loading.set(false);
        });
    });

    let today = move || chrono::Local::now().date_naive();
    let monthly = Signal::derive(move || bills.with(|b| monthly_sales(b, months.get(), today())));
    let daily = Signal::derive(move || bills.with(|b| daily_sales(b, 14, today())));
    let by_category = Signal::derive(move || expenses.with(|e| expenses_by_category(e)));
    let summary = Memo::new(move |_| bills.with(|b| expenses.with(|e| profit_summary(b, e))));
    let top = Memo::new(move |_| bills.with(|b| top_products(b, 10)));

    view! {
        <div class="page reports-page">
            <h1>"Reports"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <Loading /> }>
                <div class="stats-grid">
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().revenue))
                        label="Revenue"
                    />
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().tax_collected))
                        label="GST Collected"
                    />
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().expenses))
                        label="Expenses"
                    />
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().net))
                        label="Net Profit"
                        highlight=true
                    />
                    <StatCard
                        value=Signal::derive(move || format_amount(summary.get().average_bill))
                        label="Average Bill"
                    />
                </div>

                <div class="toolbar">
                    <span>"Monthly window:"</span>
                    {MONTH_OPTIONS.iter().map(|&m| view! {
                        <button
                            class=move || {
                                if months.get() == m { "type-btn small active" } else { "type-btn small" }
                            }
                            on:click=move |_| set_months.set(m)
                        >
                            {format!("{} months", m)}
                        </button>
                    }).collect_view()}
                </div>

                <div class="charts-grid">
                    <BarChart title="Monthly Sales" buckets=monthly />
                    <BarChart title="Last 14 Days" buckets=daily />
                    <BarChart title="Expenses by Category" buckets=by_category />
                </div>

                <div class="card">
                    <div class="card-header">
                        <h2 class="card-title">"Top Products"</h2>
                    </div>
                    <table class="data-table">
                        <thead>
                            <tr><th>"#"</th><th>"Product"</th><th>"Units"</th><th>"Revenue"</th></tr>
                        </thead>
                        <tbody>
                            {move || top.get().into_iter().enumerate().map(|(rank, product)| view! {
                                <tr>
                                    <td>{rank + 1}</td>
                                    <td>{product.name}</td>
                                    <td>{product.quantity}</td>
                                    <td>{format_amount(product.revenue)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
