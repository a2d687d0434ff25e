use crate::state::{
    cache::use_remote_cache,
    selector::{cached_source, AsyncSelector, SelectorOptions, DEFAULT_SEARCH_PARAM},
};
use leptos::*;
use serde_json::Value;

/// Option label read from a row's `name` field.
pub fn name_label(row: &Value) -> String {
    row["name"].as_str().unwrap_or_default().to_string()
}

/// Option value read from a row's `id` field.
pub fn id_value(row: &Value) -> String {
    match &row["id"] {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

/// Searchable select whose options come from `url` through the shared cache.
///
/// `value` is owned by the caller; picks are reported through `on_change`
/// and picking the current value again reports `None`.
#[component]
pub fn AsyncCombobox(
    #[prop(into)] url: String,
    label_of: fn(&Value) -> String,
    value_of: fn(&Value) -> String,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(optional)] on_change: Option<Callback<Option<String>>>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] search_placeholder: Option<String>,
    #[prop(optional, into)] empty_message: Option<String>,
    #[prop(optional, into)] search_param: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Select an option...".to_string());
    let search_placeholder = search_placeholder.unwrap_or_else(|| "Search...".to_string());
    let empty_message = empty_message.unwrap_or_else(|| "No results found.".to_string());
    let search_param = search_param.unwrap_or_else(|| DEFAULT_SEARCH_PARAM.to_string());

    let selector = AsyncSelector::new(
        cached_source::<Value>(use_remote_cache(), url, search_param),
        label_of,
        value_of,
        use_context::<SelectorOptions>().unwrap_or_default(),
    );
    let state = create_rw_signal(selector.snapshot());
    selector.set_observer(move |next| state.set(next.clone()));
    if let Some(on_change) = on_change {
        selector.set_on_change(move |next| on_change.call(next));
    }
    selector.sync_value(value.get_untracked());
    selector.mount();

    {
        let selector = selector.clone();
        create_effect(move |_| selector.sync_value(value.get()));
    }
    {
        let selector = selector.clone();
        on_cleanup(move || selector.dispose());
    }

    let (open, set_open) = create_signal(false);
    let trigger_label = {
        let placeholder = placeholder.clone();
        move || {
            state
                .with(|s| s.selected_label.clone())
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| placeholder.clone())
        }
    };
    let on_input = {
        let selector = selector.clone();
        move |ev: ev::Event| selector.set_search(event_target_value(&ev))
    };

    view! {
        <div class="relative w-full">
            <button
                type="button"
                role="combobox"
                aria-expanded=move || open.get()
                class="w-full inline-flex items-center justify-between rounded-md border border-border bg-surface-elevated px-3 py-2 text-sm text-fg disabled:opacity-50"
                disabled=move || disabled.get()
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <span>{trigger_label}</span>
                <i class="fas fa-sort ml-2 opacity-50"></i>
            </button>
            <Show when=move || open.get()>
                <div class="absolute z-10 mt-1 w-full rounded-md border border-border bg-surface-elevated shadow-lg">
                    <input
                        type="text"
                        class="w-full border-b border-border px-3 py-2 text-sm"
                        placeholder=search_placeholder.clone()
                        prop:value=move || state.with(|s| s.search_term.clone())
                        on:input=on_input.clone()
                    />
                    <ul class="max-h-32 overflow-y-auto py-1">
                        {
                            let selector = selector.clone();
                            let empty_message = empty_message.clone();
                            move || {
                                let snapshot = state.get();
                                if snapshot.is_loading {
                                    return view! {
                                        <li class="flex justify-center py-6">
                                            <div class="animate-spin rounded-full h-6 w-6 border-b-2 border-action-primary-bg"></div>
                                        </li>
                                    }
                                    .into_view();
                                }
                                if snapshot.options.is_empty() {
                                    return view! {
                                        <li class="py-6 text-center text-sm text-fg-muted">{empty_message.clone()}</li>
                                    }
                                    .into_view();
                                }
                                snapshot
                                    .options
                                    .iter()
                                    .map(|option| {
                                        let picked = option.value.clone();
                                        let selector = selector.clone();
                                        let checked = snapshot.is_selected(&option.value);
                                        view! {
                                            <li
                                                class="flex items-center px-3 py-2 text-sm cursor-pointer hover:bg-action-ghost-bg-hover"
                                                on:click=move |_| {
                                                    selector.select(&picked);
                                                    set_open.set(false);
                                                }
                                            >
                                                <i class={if checked { "fas fa-check mr-2" } else { "fas fa-check mr-2 opacity-0" }}></i>
                                                {option.label.clone()}
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }
                        }
                    </ul>
                </div>
            </Show>
        </div>
    }
}
