//! Console Pages
//!
//! One component per sidebar section, plus the login screen.

mod customers;
mod dashboard;
mod expenses;
mod home_screen;
mod login;
mod products;
mod reports;
mod sales;

pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use expenses::ExpensesPage;
pub use home_screen::HomeScreenPage;
pub use login::LoginPage;
pub use products::ProductsPage;
pub use reports::ReportsPage;
pub use sales::SalesPage;
