use crate::{
    api::ApiError,
    components::{error::InlineErrorMessage, layout::APP_NAME},
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginForm(
    username: RwSignal<String>,
    password: RwSignal<String>,
    error: Signal<Option<ApiError>>,
    pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        {format!("Sign in to {}", APP_NAME)}
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Enter your email and password to continue"
                    </p>
                </div>
                <form
                    class="mt-8 space-y-4 rounded-lg bg-surface-elevated p-6 shadow"
                    on:submit=move |ev| on_submit.call(ev)
                >
                    <div class="space-y-1">
                        <label for="username" class="text-sm font-medium text-fg">"Email"</label>
                        <input
                            id="username"
                            name="username"
                            type="email"
                            autocomplete="email"
                            class="w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                            placeholder="name@example.com"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="space-y-1">
                        <label for="password" class="text-sm font-medium text-fg">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            class="w-full rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>

                    <InlineErrorMessage error=error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
