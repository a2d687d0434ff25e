use crate::components::empty_state::EmptyState;
use leptos::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-surface p-4">
            <div class="mx-auto max-w-md w-full">
                <p class="text-center text-3xl font-bold text-fg mb-4">"404"</p>
                <EmptyState
                    title="Page Not Found"
                    description="The page you are looking for doesn't exist or has been moved."
                >
                    <a
                        href="/panel"
                        class="inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text"
                    >
                        "Go back home"
                    </a>
                </EmptyState>
            </div>
        </div>
    }
}
