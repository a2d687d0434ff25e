use leptos::*;
use leptos_router::use_params_map;

pub mod components;
pub mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::PortfolioDetailsPage;

/// Route entry for `/panel/portfolios/:id`.
#[component]
pub fn PortfolioDetailsRoute() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));
    move || view! { <PortfolioDetailsPage id=id.get() /> }
}
