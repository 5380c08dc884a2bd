//! Frontend Models
//!
//! Data structures mirroring backend JSON records.

use serde::{Deserialize, Serialize};

use crate::billing::BillType;

/// Account role returned by the auth endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    Staff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Successful login/register payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

/// Inventory item (product)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(alias = "stock", default)]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsn_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
}

/// Line of a saved bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    #[serde(default)]
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub total: f64,
}

/// Sales transaction as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub items: Vec<BillItem>,
    #[serde(default)]
    pub bill_type: BillType,
    #[serde(default)]
    pub gst_rate: Option<f64>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub labour: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(alias = "total", default)]
    pub grand_total: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Bill {
    /// Display number, falling back to the record id
    pub fn number(&self) -> &str {
        self.bill_number.as_deref().unwrap_or(&self.id)
    }
}

/// Request body for `POST /bills`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub items: Vec<BillItem>,
    pub bill_type: BillType,
    pub gst_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub labour: f64,
    pub transport: f64,
    pub grand_total: f64,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    /// `YYYY-MM-DD` (longer ISO timestamps are accepted)
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
}

/// Storefront home screen carousel entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(alias = "image", default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(alias = "order", default)]
    pub position: i32,
    #[serde(alias = "isActive", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_item_accepts_backend_aliases() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"_id":"a1","name":"Cement","price":350.5,"stock":4}"#)
                .unwrap();
        assert_eq!(item.id, "a1");
        assert_eq!(item.quantity, 4);
        assert_eq!(item.category, "");
        assert_eq!(item.gst_rate, None);
    }

    #[test]
    fn test_new_item_serializes_without_id() {
        let item =
            InventoryItem { name: "Nails".into(), price: 2.0, quantity: 100, ..Default::default() };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("hsnCode").is_none());
        assert_eq!(json["quantity"], 100);
    }

    #[test]
    fn test_bill_defaults_and_total_alias() {
        let bill: Bill = serde_json::from_str(
            r#"{"_id":"b9","customerName":"Ravi","billType":"NON-GST","total":120.0,"createdAt":"2024-03-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(bill.bill_type, BillType::NonGst);
        assert_eq!(bill.grand_total, 120.0);
        assert_eq!(bill.number(), "b9");
        assert!(bill.items.is_empty());
    }

    #[test]
    fn test_unknown_role_is_staff() {
        let user: User =
            serde_json::from_str(r#"{"id":"u","name":"A","email":"a@b.co","role":"cashier"}"#)
                .unwrap();
        assert_eq!(user.role, Role::Staff);
        assert!(!user.is_admin());
    }
}
