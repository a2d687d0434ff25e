use crate::pages::dashboard::{components::SummarySection, view_model::use_dashboard_view_model};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold text-fg">"Dashboard"</h1>
            <SummarySection portfolios=vm.portfolios assets=vm.assets />
            <div class="grid gap-6 md:grid-cols-2">
                <a href="/panel/portfolios" class="block rounded-lg border border-border bg-surface-elevated p-6 hover:bg-action-ghost-bg-hover">
                    <h3 class="font-semibold text-fg">"Portfolios"</h3>
                    <p class="text-sm text-fg-muted">"Review holdings or create a new portfolio"</p>
                </a>
                <a href="/panel/assets" class="block rounded-lg border border-border bg-surface-elevated p-6 hover:bg-action-ghost-bg-hover">
                    <h3 class="font-semibold text-fg">"Assets"</h3>
                    <p class="text-sm text-fg-muted">"Browse the asset catalogue"</p>
                </a>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::warm_cache, ssr::render_to_string};
    use serde_json::json;

    #[test]
    fn dashboard_page_renders_counts() {
        let cache = warm_cache(&[
            ("/portfolios", json!({"result": [{"id": 1}, {"id": 2}, {"id": 3}], "total": 3})),
            ("/assets", json!([{"id": 1}])),
        ]);
        let html = render_to_string(move || {
            provide_context(cache);
            view! { <DashboardPage /> }
        });
        assert!(html.contains("Dashboard"));
        assert!(html.contains("data-count=\"3\""));
        assert!(html.contains("data-count=\"1\""));
    }
}
