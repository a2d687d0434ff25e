use leptos::*;

#[component]
pub fn LoadingPage() -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col items-center justify-center p-4">
            <div class="w-full max-w-md space-y-8">
                <div class="flex justify-center">
                    <div class="h-12 w-12 rounded-full bg-surface-muted animate-pulse"></div>
                </div>
                <div class="flex flex-col items-center justify-center space-y-4">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
                    <p class="text-center text-sm text-fg-muted">"Loading your content..."</p>
                </div>
                <div class="space-y-4">
                    <div class="h-4 w-full rounded bg-surface-muted animate-pulse"></div>
                    <div class="h-4 w-3/4 rounded bg-surface-muted animate-pulse"></div>
                    <div class="h-4 w-1/2 rounded bg-surface-muted animate-pulse"></div>
                </div>
            </div>
        </div>
    }
}
