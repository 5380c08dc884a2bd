/// Console sections reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage {
    Dashboard,
    Sales,
    Products,
    Customers,
    Expenses,
    Reports,
    HomeScreen,
}

impl NavPage {
    pub const ALL: [NavPage; 7] = [
        NavPage::Dashboard,
        NavPage::Sales,
        NavPage::Products,
        NavPage::Customers,
        NavPage::Expenses,
        NavPage::Reports,
        NavPage::HomeScreen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NavPage::Dashboard => "Dashboard",
            NavPage::Sales => "Sales",
            NavPage::Products => "Products",
            NavPage::Customers => "Customers",
            NavPage::Expenses => "Expenses",
            NavPage::Reports => "Reports",
            NavPage::HomeScreen => "Home Screen",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NavPage::Dashboard => "📊",
            NavPage::Sales => "🧾",
            NavPage::Products => "📦",
            NavPage::Customers => "👥",
            NavPage::Expenses => "💸",
            NavPage::Reports => "📈",
            NavPage::HomeScreen => "🖼️",
        }
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, NavPage::HomeScreen)
    }

    /// Pages visible to a user
    pub fn visible(is_admin: bool) -> Vec<NavPage> {
        Self::ALL.into_iter().filter(|p| is_admin || !p.admin_only()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_screen_is_admin_only() {
        assert_eq!(NavPage::visible(true).len(), 7);
        let staff = NavPage::visible(false);
        assert_eq!(staff.len(), 6);
        assert!(!staff.contains(&NavPage::HomeScreen));
    }
}
