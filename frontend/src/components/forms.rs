use crate::{
    api::ApiError,
    components::{error::InlineErrorMessage, layout::SuccessMessage},
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, error: ApiError) {
        self.error = Some(error);
        self.success = None;
    }
}

/// Parses a selector value into a positive record id.
pub fn parse_id(raw: Option<&str>, message: &str) -> Result<i64, ApiError> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation(message))
}

pub fn required(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}

#[component]
pub fn FormMessages(messages: RwSignal<MessageState>) -> impl IntoView {
    let error = Signal::derive(move || messages.with(|m| m.error.clone()));
    view! {
        {move || messages.with(|m| m.success.clone()).map(|msg| view! { <SuccessMessage message=msg /> })}
        <InlineErrorMessage error=error />
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn form_messages_render_success_and_error() {
        let html = render_to_string(|| {
            let messages = create_rw_signal(MessageState::default());
            messages.update(|m| m.set_success("Holding added."));
            view! { <div><FormMessages messages=messages /></div> }
        });
        assert!(html.contains("Holding added."));
    }
}
