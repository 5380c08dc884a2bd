//! Retail Console Frontend App
//!
//! Root shell: login gate, sidebar navigation and the active page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{NavPage, NoticeStack, Sidebar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::pages::{
    CustomersPage, DashboardPage, ExpensesPage, HomeScreenPage, LoginPage, ProductsPage,
    ReportsPage, SalesPage,
};
use crate::session::SessionStore;
use crate::storage::BrowserStorage;
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();

    // State
    let restored = SessionStore::new(&BrowserStorage).load();
    let (current_user, set_current_user) = signal(restored.map(|s| s.user));
    let (notices, set_notices) = signal(Vec::new());
    let (current_page, set_current_page) = signal(NavPage::Dashboard);

    let ctx = AppContext::new((current_user, set_current_user), (notices, set_notices));
    let client = ApiClient::new(config.api_base_url.clone())
        .with_unauthorized_hook(Callback::new(move |_| ctx.session_expired()));

    // Provide context to all children
    provide_context(config);
    provide_context(ctx);
    provide_context(client);
    provide_context(Store::new(AppState::restore()));

    // Back to the dashboard on every sign-in, and off admin pages for staff
    Effect::new(move |_| {
        let admin = ctx.is_admin();
        if !ctx.is_authenticated() || (!admin && current_page.get_untracked().admin_only()) {
            set_current_page.set(NavPage::Dashboard);
        }
    });

    view! {
        <Show
            when=move || ctx.is_authenticated()
            fallback=|| view! { <LoginPage /> }
        >
            <div class="app-layout">
                <Sidebar current_page=current_page set_current_page=set_current_page />
                <main class="main-content">
                    {move || match current_page.get() {
                        NavPage::Dashboard => view! { <DashboardPage /> }.into_any(),
                        NavPage::Sales => view! { <SalesPage /> }.into_any(),
                        NavPage::Products => view! { <ProductsPage /> }.into_any(),
                        NavPage::Customers => view! { <CustomersPage /> }.into_any(),
                        NavPage::Expenses => view! { <ExpensesPage /> }.into_any(),
                        NavPage::Reports => view! { <ReportsPage /> }.into_any(),
                        NavPage::HomeScreen if ctx.is_admin() => {
                            view! { <HomeScreenPage /> }.into_any()
                        }
                        NavPage::HomeScreen => view! { <DashboardPage /> }.into_any(),
                    }}
                </main>
            </div>
        </Show>
        <NoticeStack />
    }
}
