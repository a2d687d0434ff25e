use crate::{
    components::{dialog::FormDialog, layout::ErrorMessage},
    pages::portfolios::{
        components::{CreatePortfolioCard, CreatePortfolioForm, PortfolioCard},
        view_model::use_portfolios_view_model,
    },
};
use leptos::*;

#[component]
fn PortfolioSkeleton() -> impl IntoView {
    view! {
        <div class="h-[200px] rounded-lg border border-border bg-surface-elevated p-6 space-y-3 animate-pulse">
            <div class="h-8 w-3/4 rounded bg-surface-muted"></div>
            <div class="h-4 w-full rounded bg-surface-muted"></div>
            <div class="h-4 w-2/3 rounded bg-surface-muted"></div>
        </div>
    }
}

#[component]
pub fn PortfoliosPage() -> impl IntoView {
    let vm = use_portfolios_view_model();
    let is_open = Signal::derive(move || vm.dialog_open.get());
    let waiting = move || vm.list.with(|s| s.is_loading && s.data.is_none());
    let failure = move || vm.list.with(|s| s.error.as_ref().map(|e| e.error.clone()));

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-fg">"Portfolios"</h1>
            {move || failure().map(|message| view! { <ErrorMessage message=message /> })}
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                <Show
                    when=move || !waiting()
                    fallback=|| view! { <PortfolioSkeleton /><PortfolioSkeleton /><PortfolioSkeleton /> }
                >
                    <For
                        each=move || vm.portfolios()
                        key=|portfolio| portfolio.id
                        children=move |portfolio| view! { <PortfolioCard portfolio=portfolio /> }
                    />
                    <CreatePortfolioCard on_open=Callback::new(move |_| vm.open_dialog()) />
                </Show>
            </div>
            <FormDialog
                is_open=is_open
                title="Create New Portfolio"
                description="Create a new investment portfolio to track your assets."
                on_close=Callback::new(move |_| vm.close_dialog())
            >
                <CreatePortfolioForm vm=vm />
            </FormDialog>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::warm_cache, ssr::render_to_string};
    use serde_json::json;

    #[test]
    fn renders_cards_and_create_tile() {
        let cache = warm_cache(&[(
            "/portfolios",
            json!([
                {"id": 4, "name": "Retirement", "description": "Long term", "base_currency_id": 1, "user_id": 1},
                {"id": 5, "name": "Crypto", "base_currency_id": 2, "user_id": 1}
            ]),
        )]);
        let html = render_to_string(move || {
            provide_context(cache);
            view! { <PortfoliosPage /> }
        });
        assert!(html.contains("Retirement"));
        assert!(html.contains("Long term"));
        assert!(html.contains("No description provided"));
        assert!(html.contains("/panel/portfolios/5"));
        assert!(html.contains("Create New Portfolio"));
    }
}
