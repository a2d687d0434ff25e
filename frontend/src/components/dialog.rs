use leptos::ev::KeyboardEvent;
use leptos::*;

/// Modal wrapper for create forms.
#[component]
pub fn FormDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let title = store_value(title);
    let description = store_value(description);

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_close.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_close.call(());
                        }
                    }
                >
                    <div class="flex items-start justify-between gap-3">
                        <div>
                            <h2 class="text-lg font-semibold text-fg">{title.get_value()}</h2>
                            {description
                                .get_value()
                                .map(|text| view! { <p class="text-sm text-fg-muted">{text}</p> })}
                        </div>
                        <button
                            type="button"
                            aria-label="Close"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_close.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
