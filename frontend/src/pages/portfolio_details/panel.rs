use crate::{
    components::{
        cards::StatCard,
        common::ButtonVariant,
        dialog::FormDialog,
        forms::FormMessages,
        layout::LoadingSpinner,
    },
    pages::{
        portfolio_details::{
            components::{AddHoldingForm, HoldingsTable},
            view_model::{use_portfolio_details_view_model, PortfolioView},
        },
        portfolios::utils::description_or_placeholder,
    },
};
use leptos::*;

#[component]
fn PortfolioNotFound() -> impl IntoView {
    view! {
        <div class="text-center py-10">
            <h2 class="text-2xl font-bold text-fg">"Portfolio not found"</h2>
            <p class="text-fg-muted mt-2">
                "The portfolio you're looking for doesn't exist or you don't have access to it."
            </p>
            <a href="/panel/portfolios" class="mt-4 inline-block underline text-action-primary-bg">
                "Go back to portfolios"
            </a>
        </div>
    }
}

#[component]
pub fn PortfolioDetailsPage(#[prop(into)] id: String) -> impl IntoView {
    let vm = use_portfolio_details_view_model(id);
    let is_open = Signal::derive(move || vm.dialog_open.get());
    let holdings_url = vm.holdings_url();

    view! {
        <div class="space-y-6">
            <a href="/panel/portfolios" class="inline-flex items-center text-sm text-fg-muted hover:text-fg">
                <i class="fas fa-arrow-left mr-2"></i>
                "Back to Portfolios"
            </a>
            {move || match vm.portfolio.get() {
                PortfolioView::Loading => view! { <LoadingSpinner /> }.into_view(),
                PortfolioView::Missing => view! { <PortfolioNotFound /> }.into_view(),
                PortfolioView::Ready(portfolio) => {
                    let active = portfolio.is_active;
                    view! {
                        <div class="space-y-6">
                            <div>
                                <h1 class="text-3xl font-bold text-fg">{portfolio.name.clone()}</h1>
                                <p class="text-fg-muted mt-2">
                                    {description_or_placeholder(portfolio.description.as_deref())}
                                </p>
                            </div>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                                <StatCard title="Status">
                                    {if active {
                                        view! { <span class="text-status-success-text">"Active"</span> }
                                    } else {
                                        view! { <span class="text-status-error-text">"Inactive"</span> }
                                    }}
                                </StatCard>
                                <StatCard title="Base Currency">{portfolio.base_currency_id}</StatCard>
                                <StatCard title="Holdings">{move || vm.holdings_count.get()}</StatCard>
                            </div>
                        </div>
                    }
                    .into_view()
                }
            }}
            <div class="mt-10 space-y-4">
                <div class="flex justify-between items-center">
                    <h2 class="text-2xl font-bold text-fg">"Holdings"</h2>
                    <button
                        type="button"
                        class=format!("inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold {}", ButtonVariant::Primary.classes())
                        on:click=move |_| vm.open_dialog()
                    >
                        "Add Holding"
                    </button>
                </div>
                <Show when=move || !vm.dialog_open.get()>
                    <FormMessages messages=vm.messages />
                </Show>
                <HoldingsTable url=holdings_url />
            </div>
            <FormDialog
                is_open=is_open
                title="Add New Holding"
                description="Add a new asset to your portfolio."
                on_close=Callback::new(move |_| vm.close_dialog())
            >
                <AddHoldingForm vm=vm />
            </FormDialog>
        </div>
    }
}
