use crate::{
    components::layout::LoadingSpinner,
    pages::dashboard::view_model::Count,
};
use leptos::*;

#[component]
pub fn SummarySection(portfolios: Signal<Count>, assets: Signal<Count>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-4">
            <div>
                <h3 class="text-base font-semibold text-fg">"Overview"</h3>
                <p class="text-sm text-fg-muted">"What is tracked right now"</p>
            </div>
            <div class="grid grid-cols-1 gap-4 md:grid-cols-2">
                <Metric label="Portfolios" icon="fas fa-briefcase" count=portfolios />
                <Metric label="Assets" icon="fas fa-coins" count=assets />
            </div>
        </div>
    }
}

#[component]
pub fn Metric(
    #[prop(into)] label: String,
    icon: &'static str,
    count: Signal<Count>,
) -> impl IntoView {
    view! {
        <div class="relative overflow-hidden p-6 rounded-2xl bg-surface-elevated border border-border shadow-sm">
            <div class="flex items-center justify-between">
                <p class="text-xs font-bold text-fg-muted uppercase tracking-widest">{label}</p>
                <i class=format!("{} text-fg-muted", icon)></i>
            </div>
            {move || match count.get() {
                Count::Loading => view! { <LoadingSpinner /> }.into_view(),
                Count::Unavailable => view! { <p class="mt-3 text-3xl font-extrabold text-fg-muted">"-"</p> }.into_view(),
                Count::Ready(n) => view! { <p class="mt-3 text-3xl font-extrabold text-fg" data-count=n>{n}</p> }.into_view(),
            }}
        </div>
    }
}
