use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::{
        guard::{RequireAdmin, SessionGate},
        layout::{DashboardLayout, APP_NAME},
    },
    pages::{
        AssetsPage, CurrenciesPage, DashboardPage, LoadingPage, LoginPage, NotFoundPage,
        PortfolioDetailsRoute, PortfoliosPage, UsersPage,
    },
    state::auth::AuthProvider,
};

pub const PANEL_PATH: &str = "/panel";

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/panel",
    "/panel/portfolios",
    "/panel/portfolios/:id",
    "/panel/assets",
    "/panel/users",
    "/panel/currencies",
];

pub const ADMIN_ROUTE_PATHS: &[&str] = &["/panel/users", "/panel/currencies"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_meta_context();
    view! {
        <Title text=APP_NAME/>
        <AuthProvider>
            <Router>
                <SessionGate
                    pending=|| view! { <LoadingPage/> }
                    sign_in=|| view! { <LoginPage/> }
                >
                    <AppRoutes/>
                </SessionGate>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn AppRoutes() -> impl IntoView {
    view! {
        <Routes>
            <Route path="/" view=|| view! { <Redirect path=PANEL_PATH/> }/>
            <Route path="/panel" view=PanelShell>
                <Route path="" view=DashboardPage/>
                <Route path="portfolios" view=PortfoliosPage/>
                <Route path="portfolios/:id" view=PortfolioDetailsRoute/>
                <Route path="assets" view=AssetsPage/>
                <Route path="users" view=AdminUsers/>
                <Route path="currencies" view=AdminCurrencies/>
            </Route>
            <Route path="/*any" view=NotFoundPage/>
        </Routes>
    }
}

#[component]
fn PanelShell() -> impl IntoView {
    let location = use_location();
    view! {
        <DashboardLayout current_path=location.pathname>
            <Outlet/>
        </DashboardLayout>
    }
}

#[component]
fn AdminUsers() -> impl IntoView {
    view! { <RequireAdmin><UsersPage/></RequireAdmin> }
}

#[component]
fn AdminCurrencies() -> impl IntoView {
    view! { <RequireAdmin><CurrenciesPage/></RequireAdmin> }
}
