use crate::{api::PortfolioResponse, pages::portfolios::utils::description_or_placeholder};
use leptos::*;

#[component]
pub fn PortfolioCard(portfolio: PortfolioResponse) -> impl IntoView {
    let href = format!("/panel/portfolios/{}", portfolio.id);
    view! {
        <div class="h-[220px] flex flex-col rounded-lg border border-border bg-surface-elevated shadow-sm">
            <div class="p-6 pb-2">
                <h3 class="text-lg font-semibold text-fg">{portfolio.name.clone()}</h3>
            </div>
            <div class="px-6 flex-grow">
                <p class="text-sm text-fg-muted line-clamp-3">
                    {description_or_placeholder(portfolio.description.as_deref())}
                </p>
                <p class="text-sm mt-2 text-fg">
                    <span class="font-medium">"Currency: "</span>
                    {portfolio.base_currency_id}
                </p>
            </div>
            <div class="p-6 pt-2">
                <a
                    href=href
                    class="block w-full text-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                >
                    "View Details"
                </a>
            </div>
        </div>
    }
}

#[component]
pub fn CreatePortfolioCard(on_open: Callback<()>) -> impl IntoView {
    view! {
        <button
            type="button"
            class="h-[220px] flex flex-col justify-center items-center rounded-lg border-2 border-dashed border-border-strong hover:bg-action-ghost-bg-hover transition-colors"
            on:click=move |_| on_open.call(())
        >
            <div class="mx-auto bg-surface-muted rounded-full w-12 h-12 flex items-center justify-center mb-4">
                <i class="fas fa-plus"></i>
            </div>
            <h3 class="font-medium text-lg mb-1 text-fg">"Create New Portfolio"</h3>
            <p class="text-sm text-fg-muted">"Add a new investment portfolio"</p>
        </button>
    }
}
