//! Expenses Page
//!
//! Expense CRUD with category and date-range filters.

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient};
use crate::billing::{format_amount, round2};
use crate::components::{DeleteConfirmButton, Pagination, SearchInput};
use crate::config::AppConfig;
use crate::context::{use_app_context, NoticeKind};
use crate::export;
use crate::listing::{matches_query, Page};
use crate::models::Expense;
use crate::reports::{in_range, parse_date};
use crate::validation;

const EXPENSE_CATEGORIES: &[&str] =
    &["Rent", "Salary", "Utilities", "Transport", "Purchase", "Maintenance", "Other"];

#[derive(Debug, Clone, PartialEq)]
struct ExpenseForm {
    title: String,
    amount: String,
    category: String,
    date: String,
    payment_method: String,
    notes: String,
}

impl ExpenseForm {
    fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            category: EXPENSE_CATEGORIES[0].to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            payment_method: "cash".to_string(),
            notes: String::new(),
        }
    }

    fn from_expense(e: &Expense) -> Self {
        Self {
            title: e.title.clone(),
            amount: e.amount.to_string(),
            category: e.category.clone(),
            date: e.date.chars().take(10).collect(),
            payment_method: e.payment_method.clone().unwrap_or_default(),
            notes: e.notes.clone().unwrap_or_default(),
        }
    }

    fn to_expense(&self, id: Option<String>) -> Result<Expense, String> {
        validation::required("Title", &self.title)?;
        let amount = validation::positive_amount("Amount", &self.amount)?;
        let date = parse_date(self.date.trim()).ok_or_else(|| "Pick a valid date".to_string())?;
        let notes = self.notes.trim();
        Ok(Expense {
            id: id.unwrap_or_default(),
            title: self.title.trim().to_string(),
            amount,
            category: self.category.trim().to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            payment_method: Some(self.payment_method.clone()).filter(|p| !p.is_empty()),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Expenses matching every filter, newest first
fn filter_expenses(
    expenses: &[Expense],
    query: &str,
    category: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Expense> {
    let mut list: Vec<Expense> = expenses
        .iter()
        .filter(|e| category.is_empty() || e.category.eq_ignore_ascii_case(category))
        .filter(|e| in_range(parse_date(&e.date), from, to))
        .filter(|e| matches_query([e.title.as_str(), e.notes.as_deref().unwrap_or("")], query))
        .cloned()
        .collect();
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

fn total(expenses: &[Expense]) -> f64 {
    round2(expenses.iter().map(|e| e.amount).sum())
}

#[component]
pub fn ExpensesPage() -> impl IntoView {
    let ctx = use_app_context();
    let client = expect_context::<ApiClient>();
    let page_size = expect_context::<AppConfig>().page_size;
    let today = chrono::Local::now().date_naive();

    let (expenses, set_expenses) = signal(Vec::<Expense>::new());
    let (query, set_query) = signal(String::new());
    let (category_filter, set_category_filter) = signal(String::new());
    let (from, set_from) = signal(String::new());
    let (to, set_to) = signal(String::new());
    let (page, set_page) = signal(1usize);

    let (form, set_form) = signal(ExpenseForm::new(today));
    let (editing, set_editing) = signal::<Option<String>>(None);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let load_client = client.clone();
    Effect::new(move |_| {
        let client = load_client.clone();
        spawn_local(async move {
            match api::list_expenses(&client).await {
                Ok(loaded) => set_expenses.set(loaded),
                Err(e) => ctx.report_error("Loading expenses", &e),
            }
        });
    });

    let filtered = Memo::new(move |_| {
        expenses.with(|list| {
            filter_expenses(
                list,
                &query.get(),
                &category_filter.get(),
                parse_date(&from.get()),
                parse_date(&to.get()),
            )
        })
    });
    let current_page =
        Memo::new(move |_| filtered.with(|list| Page::paginate(list, page.get(), page_size)));

    let reset_form = move || {
        set_form.set(ExpenseForm::new(today));
        set_editing.set(None);
        set_form_error.set(None);
    };

    let save_client = client.clone();
    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = editing.get();
        let expense = match form.with(|f| f.to_expense(id.clone())) {
            Ok(expense) => expense,
            Err(e) => {
                set_form_error.set(Some(e));
                return;
            }
        };
        let client = save_client.clone();
        spawn_local(async move {
            let result = match id {
                Some(_) => api::update_expense(&client, &expense).await,
                None => api::create_expense(&client, &expense).await,
            };
            match result {
                Ok(saved) => {
                    ctx.notify(NoticeKind::Success, format!("Saved expense {}", saved.title));
                    set_expenses.update(|list| match list.iter_mut().find(|e| e.id == saved.id) {
                        Some(existing) => *existing = saved,
                        None => list.push(saved),
                    });
                    reset_form();
                }
                Err(e) => ctx.report_error("Saving expense", &e),
            }
        });
    };

    let delete_client = client.clone();
    let delete_expense = move |id: String| {
        let client = delete_client.clone();
        spawn_local(async move {
            match api::delete_expense(&client, &id).await {
                Ok(()) => {
                    set_expenses.update(|list| list.retain(|e| e.id != id));
                    ctx.notify(NoticeKind::Success, "Expense deleted");
                }
                Err(e) => ctx.report_error("Deleting expense", &e),
            }
        });
    };

    let export_expenses = move |_| {
        let table = export::expenses_table(&filtered.get_untracked());
        if let Err(e) = export::download_csv("expenses", &table) {
            log::error!("CSV export failed: {}", e);
            ctx.notify(NoticeKind::Error, "CSV export failed");
        }
    };

    let field = move |label: &'static str,
                      kind: &'static str,
                      get: fn(&ExpenseForm) -> String,
                      set: fn(&mut ExpenseForm, String)| {
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
        <div class="page expenses-page">
            <h1>"Expenses"</h1>

            <form class="card expense-form" on:submit=on_save>
                <h2 class="card-title">
                    {move || if editing.get().is_some() { "Edit expense" } else { "Add expense" }}
                </h2>
                <div class="form-grid">
                    {field("Title", "text", |f| f.title.clone(), |f, v| f.title = v)}
                    {field("Amount", "number", |f| f.amount.clone(), |f, v| f.amount = v)}
                    <label>
                        "Category"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_form.update(|f| f.category = value);
                        }>
                            {EXPENSE_CATEGORIES.iter().map(|c| view! {
                                <option value=*c selected=move || form.with(|f| f.category == *c)>{*c}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    {field("Date", "date", |f| f.date.clone(), |f, v| f.date = v)}
                    <label>
                        "Payment"
                        <select on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_form.update(|f| f.payment_method = value);
                        }>
                            {["cash", "upi", "card", "bank"].into_iter().map(|m| view! {
                                <option value=m selected=move || form.with(|f| f.payment_method == m)>{m.to_uppercase()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    {field("Notes", "text", |f| f.notes.clone(), |f, v| f.notes = v)}
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
                        {move || {
                            filtered.with(|l| format!("Expenses ({}) · Total {}", l.len(), format_amount(total(l))))
                        }}
                    </h2>
                    <button class="secondary-btn" on:click=export_expenses>"Export CSV"</button>
                </div>
                <div class="toolbar">
                    <SearchInput query=query set_query=set_query set_page=set_page placeholder="Search title or notes" />
                    <select on:change=move |ev| {
                        set_page.set(1);
                        set_category_filter.set(event_target_value(&ev));
                    }>
                        <option value="">"All categories"</option>
                        {EXPENSE_CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                    </select>
                    <label>
                        "From"
                        <input type="date" prop:value=move || from.get()
                            on:input=move |ev| { set_page.set(1); set_from.set(event_target_value(&ev)); } />
                    </label>
                    <label>
                        "To"
                        <input type="date" prop:value=move || to.get()
                            on:input=move |ev| { set_page.set(1); set_to.set(event_target_value(&ev)); } />
                    </label>
                </div>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Date"</th><th>"Title"</th><th>"Category"</th>
                            <th>"Amount"</th><th>"Payment"</th><th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || current_page.get().items
                            key=|e| (e.id.clone(), e.title.clone(), e.amount.to_bits(), e.date.clone())
                            children=move |expense| {
                                let edit = expense.clone();
                                let id = expense.id.clone();
                                let delete_expense = delete_expense.clone();
                                view! {
                                    <tr>
                                        <td>{expense.date.chars().take(10).collect::<String>()}</td>
                                        <td>{expense.title.clone()}</td>
                                        <td>{expense.category.clone()}</td>
                                        <td>{format_amount(expense.amount)}</td>
                                        <td>{expense.payment_method.clone().unwrap_or_default()}</td>
                                        <td class="actions">
                                            <button
                                                class="secondary-btn"
                                                on:click=move |_| {
                                                    set_form.set(ExpenseForm::from_expense(&edit));
                                                    set_editing.set(Some(edit.id.clone()));
                                                    set_form_error.set(None);
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <DeleteConfirmButton
                                                record=expense.title.clone()
                                                on_confirm=move |_| delete_expense(id.clone())
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

    fn expense(title: &str, category: &str, amount: f64, date: &str) -> Expense {
        Expense {
            id: title.into(),
            title: title.into(),
            amount,
            category: category.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_form_validation() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut form = ExpenseForm::new(today);
        assert_eq!(form.date, "2024-06-01");
        assert!(form.to_expense(None).is_err());

        form.title = "Shop rent".into();
        form.amount = "15000".into();
        let saved = form.to_expense(None).unwrap();
        assert_eq!(saved.category, "Rent");
        assert_eq!(saved.notes, None);
        assert_eq!(saved.payment_method.as_deref(), Some("cash"));

        form.date = "01/06/2024".into();
        assert_eq!(form.to_expense(None), Err("Pick a valid date".to_string()));
    }

    #[test]
    fn test_filter_and_total() {
        let expenses = vec![
            expense("Rent", "Rent", 1000.0, "2024-05-01"),
            expense("Diesel", "Transport", 250.5, "2024-05-20T08:00:00Z"),
            expense("Bus", "Transport", 40.0, "2024-06-02"),
        ];
        let may =
            filter_expenses(&expenses, "", "", parse_date("2024-05-01"), parse_date("2024-05-31"));
        let titles: Vec<&str> = may.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Diesel", "Rent"]);
        assert_eq!(total(&may), 1250.5);

        let transport = filter_expenses(&expenses, "", "transport", None, None);
        assert_eq!(transport.len(), 2);
        assert_eq!(filter_expenses(&expenses, "dies", "", None, None).len(), 1);
    }
}
