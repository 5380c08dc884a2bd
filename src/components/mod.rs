//! UI Components
//!
//! Reusable Leptos components.

mod bar_chart;
mod cart_panel;
mod delete_confirm_button;
mod loading;
mod nav_page;
mod notice_stack;
mod pagination;
mod search_input;
mod sidebar;
mod stat_card;

pub use bar_chart::BarChart;
pub use cart_panel::CartPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use loading::Loading;
pub use nav_page::NavPage;
pub use notice_stack::NoticeStack;
pub use pagination::Pagination;
pub use search_input::SearchInput;
pub use sidebar::Sidebar;
pub use stat_card::StatCard;
