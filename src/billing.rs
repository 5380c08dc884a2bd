//! Billing Arithmetic
//!
//! Subtotal, GST and grand-total rules for the sales form.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::models::{BillItem, NewBill};

/// GST rate applied when none is given
pub const DEFAULT_GST_RATE: f64 = 18.0;

/// Tax classification of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BillType {
    #[default]
    #[serde(rename = "GST", alias = "gst")]
    Gst,
    #[serde(rename = "NON-GST", alias = "non-gst", alias = "NON_GST")]
    NonGst,
}

impl BillType {
    pub fn label(&self) -> &'static str {
        match self {
            BillType::Gst => "GST",
            BillType::NonGst => "NON-GST",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "NON-GST" => BillType::NonGst,
            _ => BillType::Gst,
        }
    }
}

/// Round to paise
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rupee display string
pub fn format_amount(value: f64) -> String {
    format!("₹{:.2}", round2(value))
}

/// Resolve the GST percentage: default when unset, clamped to 0..=100
pub fn effective_rate(rate: Option<f64>) -> f64 {
    match rate {
        Some(r) if r.is_finite() => r.clamp(0.0, 100.0),
        _ => DEFAULT_GST_RATE,
    }
}

/// Σ(quantity × price)
pub fn subtotal(lines: &[CartLine]) -> f64 {
    round2(lines.iter().map(CartLine::line_total).sum())
}

/// Tax on a subtotal; NON-GST bills carry none
pub fn tax(subtotal: f64, bill_type: BillType, rate: Option<f64>) -> f64 {
    match bill_type {
        BillType::Gst => round2(subtotal * effective_rate(rate) / 100.0),
        BillType::NonGst => 0.0,
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Adjustments entered on the billing form
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Charges {
    pub discount: f64,
    pub labour: f64,
    pub transport: f64,
}

/// Computed bill amounts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BillTotals {
    pub subtotal: f64,
    pub rate: f64,
    pub tax: f64,
    pub discount: f64,
    pub labour: f64,
    pub transport: f64,
    pub grand_total: f64,
}

impl BillTotals {
    /// grand = max(0, subtotal + tax - discount) + labour + transport
    pub fn compute(
        lines: &[CartLine],
        bill_type: BillType,
        rate: Option<f64>,
        charges: Charges,
    ) -> Self {
        let subtotal = subtotal(lines);
        let rate = match bill_type {
            BillType::Gst => effective_rate(rate),
            BillType::NonGst => 0.0,
        };
        let tax = tax(subtotal, bill_type, Some(rate));
        let discount = non_negative(charges.discount);
        let labour = non_negative(charges.labour);
        let transport = non_negative(charges.transport);
        let grand_total = round2((subtotal + tax - discount).max(0.0) + labour + transport);

        Self { subtotal, rate, tax, discount, labour, transport, grand_total }
    }
}

/// Everything needed to submit a bill from the sales page
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub bill_type: BillType,
    pub gst_rate: Option<f64>,
    pub charges: Charges,
    pub payment_method: String,
}

impl BillDraft {
    pub fn validate(&self, lines: &[CartLine]) -> Result<(), String> {
        if lines.is_empty() {
            return Err("Cart is empty".to_string());
        }
        if self.customer_name.trim().is_empty() {
            return Err("Customer name is required".to_string());
        }
        if let Some(rate) = self.gst_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err("GST rate must be between 0 and 100".to_string());
            }
        }
        Ok(())
    }

    /// Build the request body, recomputing totals from the cart
    pub fn into_request(self, lines: &[CartLine]) -> NewBill {
        let totals = BillTotals::compute(lines, self.bill_type, self.gst_rate, self.charges);
        let items = lines
            .iter()
            .map(|line| BillItem {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
                total: round2(line.line_total()),
            })
            .collect();

        NewBill {
            customer_id: self.customer_id,
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.filter(|p| !p.trim().is_empty()),
            items,
            bill_type: self.bill_type,
            gst_rate: totals.rate,
            subtotal: totals.subtotal,
            tax: totals.tax,
            discount: totals.discount,
            labour: totals.labour,
            transport: totals.transport,
            grand_total: totals.grand_total,
            payment_method: self.payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.to_string(),
            name: id.to_uppercase(),
            price,
            quantity,
            max_quantity: None,
        }
    }

    #[test]
    fn test_rate_defaults_and_clamps() {
        assert_eq!(effective_rate(None), 18.0);
        assert_eq!(effective_rate(Some(f64::NAN)), 18.0);
        assert_eq!(effective_rate(Some(-5.0)), 0.0);
        assert_eq!(effective_rate(Some(150.0)), 100.0);
        assert_eq!(effective_rate(Some(12.0)), 12.0);
    }

    #[test]
    fn test_subtotal_and_tax() {
        let lines = vec![line("a", 100.0, 2), line("b", 50.0, 1)];
        assert_eq!(subtotal(&lines), 250.0);
        assert_eq!(tax(250.0, BillType::Gst, None), 45.0);
        assert_eq!(tax(250.0, BillType::Gst, Some(5.0)), 12.5);
        assert_eq!(tax(250.0, BillType::NonGst, Some(18.0)), 0.0);
    }

    #[test]
    fn test_grand_total_with_charges() {
        let lines = vec![line("a", 100.0, 1)];
        let charges = Charges { discount: 18.0, labour: 20.0, transport: 30.0 };
        let totals = BillTotals::compute(&lines, BillType::Gst, None, charges);
        assert_eq!(totals.tax, 18.0);
        assert_eq!(totals.grand_total, 150.0);
    }

    #[test]
    fn test_discount_cannot_push_goods_below_zero() {
        let lines = vec![line("a", 100.0, 1)];
        let charges = Charges { discount: 500.0, labour: 25.0, transport: 10.0 };
        let totals = BillTotals::compute(&lines, BillType::NonGst, None, charges);
        assert_eq!(totals.rate, 0.0);
        assert_eq!(totals.grand_total, 35.0);
    }

    #[test]
    fn test_negative_charges_ignored() {
        let lines = vec![line("a", 10.0, 3)];
        let charges = Charges { discount: -5.0, labour: -1.0, transport: f64::NAN };
        let totals = BillTotals::compute(&lines, BillType::NonGst, None, charges);
        assert_eq!(totals.grand_total, 30.0);
    }

    #[test]
    fn test_draft_validation_and_request() {
        let lines = vec![line("a", 99.99, 3)];
        let draft = BillDraft {
            customer_id: None,
            customer_name: "  Meena ".to_string(),
            customer_phone: Some("".to_string()),
            bill_type: BillType::Gst,
            gst_rate: Some(12.0),
            charges: Charges::default(),
            payment_method: "upi".to_string(),
        };
        assert!(draft.validate(&[]).is_err());
        assert!(draft.validate(&lines).is_ok());

        let bad_rate = BillDraft { gst_rate: Some(120.0), ..draft.clone() };
        assert!(bad_rate.validate(&lines).is_err());

        let request = draft.into_request(&lines);
        assert_eq!(request.customer_name, "Meena");
        assert_eq!(request.customer_phone, None);
        assert_eq!(request.subtotal, 299.97);
        assert_eq!(request.tax, 36.0);
        assert_eq!(request.grand_total, 335.97);
        assert_eq!(request.items[0].total, 299.97);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5), "₹1234.50");
        assert_eq!(format_amount(0.005), "₹0.01");
    }

    #[test]
    fn test_bill_type_labels() {
        assert_eq!(BillType::from_label("NON-GST"), BillType::NonGst);
        assert_eq!(BillType::from_label("anything"), BillType::Gst);
        assert_eq!(serde_json::to_string(&BillType::NonGst).unwrap(), r#""NON-GST""#);
    }
}
