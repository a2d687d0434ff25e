use leptos::*;

#[component]
pub fn StatCard(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="rounded-lg border border-border bg-surface-elevated shadow-sm">
            <div class="px-6 pt-6 pb-2">
                <h3 class="text-sm font-medium text-fg-muted">{title}</h3>
            </div>
            <div class="px-6 pb-6 text-2xl font-bold text-fg">{children()}</div>
        </div>
    }
}
