//! Report Aggregation
//!
//! Buckets bills and expenses into chart-ready series.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::billing::round2;
use crate::models::{Bill, Expense};

/// One bar of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub value: f64,
}

/// Date part of an ISO date or timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = value.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn bill_date(bill: &Bill) -> Option<NaiveDate> {
    bill.created_at.as_deref().and_then(parse_date)
}

/// Inclusive range check; open ends match everything
pub fn in_range(date: Option<NaiveDate>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match date {
        Some(d) => from.map_or(true, |f| d >= f) && to.map_or(true, |t| d <= t),
        None => from.is_none() && to.is_none(),
    }
}

/// Sales per calendar month for the last `months` months, oldest first
pub fn monthly_sales(bills: &[Bill], months: u32, today: NaiveDate) -> Vec<Bucket> {
    let current = today.year() * 12 + today.month0() as i32;
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for bill in bills {
        if let Some(date) = bill_date(bill) {
            *totals.entry(date.year() * 12 + date.month0() as i32).or_default() += bill.grand_total;
        }
    }

    (0..months as i32)
        .rev()
        .map(|offset| {
            let index = current - offset;
            let (year, month) = (index.div_euclid(12), index.rem_euclid(12) + 1);
            Bucket {
                label: format!("{:04}-{:02}", year, month),
                value: round2(totals.get(&index).copied().unwrap_or(0.0)),
            }
        })
        .collect()
}

/// Sales per day for the last `days` days, oldest first
pub fn daily_sales(bills: &[Bill], days: u32, today: NaiveDate) -> Vec<Bucket> {
    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
    for bill in bills {
        if let Some(date) = bill_date(bill) {
            *totals.entry(date).or_default() += bill.grand_total;
        }
    }

    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let day = today - Duration::days(offset);
            Bucket {
                label: day.format("%d %b").to_string(),
                value: round2(totals.get(&day).copied().unwrap_or(0.0)),
            }
        })
        .collect()
}

/// Expense totals per category, largest first
pub fn expenses_by_category(expenses: &[Expense]) -> Vec<Bucket> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for expense in expenses {
        let category = expense.category.trim();
        let key = if category.is_empty() { "Uncategorized" } else { category };
        *totals.entry(key.to_string()).or_default() += expense.amount;
    }

    let mut buckets: Vec<Bucket> = totals
        .into_iter()
        .map(|(label, value)| Bucket { label, value: round2(value) })
        .collect();
    buckets.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    buckets
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u32,
    pub revenue: f64,
}

/// Best sellers by units sold
pub fn top_products(bills: &[Bill], limit: usize) -> Vec<ProductSales> {
    let mut by_name: HashMap<String, ProductSales> = HashMap::new();
    for item in bills.iter().flat_map(|b| &b.items) {
        let entry = by_name.entry(item.name.clone()).or_insert_with(|| ProductSales {
            name: item.name.clone(),
            quantity: 0,
            revenue: 0.0,
        });
        entry.quantity += item.quantity;
        entry.revenue += item.quantity as f64 * item.price;
    }

    let mut products: Vec<ProductSales> = by_name.into_values().collect();
    for p in &mut products {
        p.revenue = round2(p.revenue);
    }
    products.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    products.truncate(limit);
    products
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfitSummary {
    pub revenue: f64,
    pub tax_collected: f64,
    pub expenses: f64,
    pub net: f64,
    pub bill_count: usize,
    pub average_bill: f64,
}

pub fn profit_summary(bills: &[Bill], expenses: &[Expense]) -> ProfitSummary {
    let revenue = round2(bills.iter().map(|b| b.grand_total).sum());
    let tax_collected = round2(bills.iter().map(|b| b.tax).sum());
    let spent = round2(expenses.iter().map(|e| e.amount).sum());
    let average_bill = if bills.is_empty() { 0.0 } else { round2(revenue / bills.len() as f64) };

    ProfitSummary {
        revenue,
        tax_collected,
        expenses: spent,
        net: round2(revenue - spent),
        bill_count: bills.len(),
        average_bill,
    }
}

/// Bar width as a percentage of the largest bucket
pub fn bar_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

pub fn max_value(buckets: &[Bucket]) -> f64 {
    buckets.iter().map(|b| b.value).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillItem;

    fn bill(date: &str, total: f64, items: Vec<(&str, u32, f64)>) -> Bill {
        serde_json::from_value::<Bill>(serde_json::json!({
            "id": date,
            "createdAt": date,
            "grandTotal": total,
        }))
        .map(|mut b| {
            b.items = items
                .into_iter()
                .map(|(name, quantity, price)| BillItem {
                    product_id: name.into(),
                    name: name.into(),
                    quantity,
                    price,
                    total: quantity as f64 * price,
                })
                .collect();
            b
        })
        .unwrap()
    }

    fn expense(title: &str, amount: f64, category: &str) -> Expense {
        Expense { title: title.into(), amount, category: category.into(), ..Default::default() }
    }

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-05T10:11:12Z"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_date("2024-3-5"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_monthly_sales_spans_year_boundary() {
        let bills = vec![
            bill("2023-12-31T23:00:00Z", 100.0, vec![]),
            bill("2024-02-10", 50.0, vec![]),
            bill("2024-02-11", 25.0, vec![]),
            bill("2022-01-01", 999.0, vec![]),
        ];
        let buckets = monthly_sales(&bills, 3, day("2024-02-15"));
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(buckets.iter().map(|b| b.value).collect::<Vec<_>>(), vec![100.0, 0.0, 75.0]);
    }

    #[test]
    fn test_daily_sales() {
        let bills = vec![bill("2024-02-14", 10.0, vec![]), bill("2024-02-15", 5.0, vec![])];
        let buckets = daily_sales(&bills, 3, day("2024-02-15"));
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label, "13 Feb");
        assert_eq!(buckets.iter().map(|b| b.value).collect::<Vec<_>>(), vec![0.0, 10.0, 5.0]);
    }

    #[test]
    fn test_expenses_by_category() {
        let expenses = vec![
            expense("Rent", 500.0, "Rent"),
            expense("Tea", 20.0, " "),
            expense("Fuel", 300.0, "Travel"),
            expense("Bus", 250.0, "Travel"),
        ];
        let buckets = expenses_by_category(&expenses);
        assert_eq!(buckets[0], Bucket { label: "Travel".into(), value: 550.0 });
        assert_eq!(buckets[1].label, "Rent");
        assert_eq!(buckets[2].label, "Uncategorized");
    }

    #[test]
    fn test_top_products_and_profit() {
        let bills = vec![
            bill("2024-01-01", 130.0, vec![("Bolt", 10, 2.0), ("Nut", 5, 1.0)]),
            bill("2024-01-02", 65.0, vec![("Nut", 20, 1.0), ("Washer", 1, 45.0)]),
        ];
        let top = top_products(&bills, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ProductSales { name: "Nut".into(), quantity: 25, revenue: 25.0 });
        assert_eq!(top[1].name, "Bolt");

        let expenses = vec![Expense { title: "Rent".into(), amount: 45.0, ..Default::default() }];
        let summary = profit_summary(&bills, &expenses);
        assert_eq!(summary.revenue, 195.0);
        assert_eq!(summary.net, 150.0);
        assert_eq!(summary.average_bill, 97.5);
        assert_eq!(profit_summary(&[], &[]).average_bill, 0.0);
    }

    #[test]
    fn test_range_and_bars() {
        let d = parse_date("2024-05-10");
        assert!(in_range(d, parse_date("2024-05-01"), parse_date("2024-05-10")));
        assert!(!in_range(d, parse_date("2024-05-11"), None));
        assert!(in_range(None, None, None));
        assert!(!in_range(None, parse_date("2024-05-01"), None));

        assert_eq!(bar_percent(50.0, 200.0), 25.0);
        assert_eq!(bar_percent(5.0, 0.0), 0.0);
        let buckets = vec![
            Bucket { label: "a".into(), value: 3.0 },
            Bucket { label: "b".into(), value: 7.0 },
        ];
        assert_eq!(max_value(&buckets), 7.0);
    }
}
