use crate::api::ApiError;
use leptos::*;
use serde_json::Value;

/// Messages from a FastAPI-style `detail` list, if the error carries one.
fn detail_messages(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("detail").or(Some(details)))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .or_else(|| item.as_str())
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Error block shown next to a form.
#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let messages = detail_messages(&e);
                    if messages.len() > 1 {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {messages.into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                            </ul>
                        }.into_view();
                    }
                    match e.status {
                        Some(status) if status >= 500 => {
                            view! { <div class="text-xs opacity-75">{format!("HTTP {}", status)}</div> }.into_view()
                        }
                        _ => ().into_view(),
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_messages_from_validation_detail_list() {
        let mut error = ApiError::validation("name: field required");
        error.details = Some(json!({"detail": [
            {"loc": ["body", "name"], "msg": "field required"},
            {"loc": ["body", "symbol"], "msg": "field required"}
        ]}));
        assert_eq!(detail_messages(&error).len(), 2);
        assert!(detail_messages(&ApiError::unknown("x")).is_empty());
    }
}
