//! Export Helpers
//!
//! CSV generation for table pages and browser-side file downloads.

use wasm_bindgen::JsCast;

use crate::billing::round2;
use crate::models::{Bill, Customer, Expense, InventoryItem};

/// Headers plus rows ready for `to_csv`
pub struct CsvTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub fn to_csv(table: &CsvTable) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn money(value: f64) -> String {
    format!("{:.2}", round2(value))
}

pub fn products_table(items: &[InventoryItem]) -> CsvTable {
    CsvTable {
        headers: vec!["Name", "Category", "SKU", "HSN", "Price", "Quantity", "GST %"],
        rows: items
            .iter()
            .map(|i| {
                vec![
                    i.name.clone(),
                    i.category.clone(),
                    i.sku.clone().unwrap_or_default(),
                    i.hsn_code.clone().unwrap_or_default(),
                    money(i.price),
                    i.quantity.to_string(),
                    i.gst_rate.map(|r| r.to_string()).unwrap_or_default(),
                ]
            })
            .collect(),
    }
}

pub fn customers_table(customers: &[Customer]) -> CsvTable {
    CsvTable {
        headers: vec!["Name", "Phone", "Email", "Address", "GSTIN"],
        rows: customers
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.phone.clone(),
                    c.email.clone().unwrap_or_default(),
                    c.address.clone().unwrap_or_default(),
                    c.gstin.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    }
}

pub fn expenses_table(expenses: &[Expense]) -> CsvTable {
    CsvTable {
        headers: vec!["Date", "Title", "Category", "Amount", "Payment", "Notes"],
        rows: expenses
            .iter()
            .map(|e| {
                vec![
                    e.date.chars().take(10).collect(),
                    e.title.clone(),
                    e.category.clone(),
                    money(e.amount),
                    e.payment_method.clone().unwrap_or_default(),
                    e.notes.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    }
}

pub fn bills_table(bills: &[Bill]) -> CsvTable {
    CsvTable {
        headers: vec![
            "Bill",
            "Date",
            "Customer",
            "Type",
            "Items",
            "Subtotal",
            "Tax",
            "Discount",
            "Grand Total",
        ],
        rows: bills
            .iter()
            .map(|b| {
                vec![
                    b.number().to_string(),
                    b.created_at.as_deref().unwrap_or("").chars().take(10).collect(),
                    b.customer_name.clone(),
                    b.bill_type.label().to_string(),
                    b.items.iter().map(|i| i.quantity).sum::<u32>().to_string(),
                    money(b.subtotal),
                    money(b.tax),
                    money(b.discount),
                    money(b.grand_total),
                ]
            })
            .collect(),
    }
}

/// `prefix-YYYY-MM-DD.csv` for today
pub fn dated_filename(prefix: &str, extension: &str) -> String {
    format!("{}-{}.{}", prefix, chrono::Local::now().format("%Y-%m-%d"), extension)
}

/// Hand bytes to the browser as a file download
pub fn download_bytes(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("Blob error: {:?}", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("URL error: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("DOM error: {:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Render and download a CSV table
pub fn download_csv(prefix: &str, table: &CsvTable) -> Result<(), String> {
    let csv = to_csv(table).map_err(|e| e.to_string())?;
    download_bytes(&dated_filename(prefix, "csv"), "text/csv;charset=utf-8", csv.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_quotes_fields() {
        let table = CsvTable {
            headers: vec!["Name", "Note"],
            rows: vec![vec!["Tile, white".into(), "say \"hi\"".into()]],
        };
        let csv = to_csv(&table).unwrap();
        assert_eq!(csv, "Name,Note\n\"Tile, white\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_products_table() {
        let items = vec![InventoryItem {
            id: "1".into(),
            name: "Paint".into(),
            category: "Finishes".into(),
            price: 499.5,
            quantity: 3,
            gst_rate: Some(28.0),
            ..Default::default()
        }];
        let table = products_table(&items);
        assert_eq!(table.headers.len(), table.rows[0].len());
        assert_eq!(table.rows[0][4], "499.50");
        assert_eq!(table.rows[0][6], "28");
    }

    #[test]
    fn test_expenses_table_trims_timestamps() {
        let expenses = vec![Expense {
            title: "Rent".into(),
            amount: 15000.0,
            date: "2024-04-01T00:00:00.000Z".into(),
            ..Default::default()
        }];
        let table = expenses_table(&expenses);
        assert_eq!(table.rows[0][0], "2024-04-01");
        assert_eq!(table.rows[0][3], "15000.00");
    }

    #[test]
    fn test_dated_filename() {
        let name = dated_filename("bills", "csv");
        assert!(name.starts_with("bills-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "bills-2024-01-01.csv".len());
    }
}
