use super::{repository::AssetsRepository, utils::AssetFormState};
use crate::{
    api::{ApiClient, ApiError, AssetResponse, CreateAsset, ASSETS_PATH},
    components::forms::MessageState,
    state::cache::use_remote_cache,
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct AssetsViewModel {
    pub form: RwSignal<AssetFormState>,
    pub messages: RwSignal<MessageState>,
    pub dialog_open: RwSignal<bool>,
    pub create_action: Action<CreateAsset, Result<AssetResponse, ApiError>>,
}

impl AssetsViewModel {
    pub fn open_dialog(&self) {
        self.messages.update(MessageState::clear);
        self.dialog_open.set(true);
    }

    pub fn close_dialog(&self) {
        self.dialog_open.set(false);
    }

    pub fn submit(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        match self.form.with_untracked(AssetFormState::to_request) {
            Ok(payload) => self.create_action.dispatch(payload),
            Err(err) => self.messages.update(|m| m.set_error(err)),
        }
    }
}

pub fn use_assets_view_model() -> AssetsViewModel {
    let client = use_context::<ApiClient>().unwrap_or_default();
    let repository = AssetsRepository::new_with_client(Rc::new(client));
    let cache = use_remote_cache();

    let form = create_rw_signal(AssetFormState::default());
    let messages = create_rw_signal(MessageState::default());
    let dialog_open = create_rw_signal(false);

    let create_action = create_action(move |payload: &CreateAsset| {
        let repo = repository.clone();
        let cache = cache.clone();
        let payload = payload.clone();
        async move {
            let result = repo.create_asset(payload).await;
            if result.is_ok() {
                cache.invalidate_path(ASSETS_PATH);
            }
            result
        }
    });

    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(asset) => {
                    log::info!("Created asset {}", asset.id);
                    messages.update(|m| m.set_success("Asset created."));
                    form.update(AssetFormState::reset);
                    dialog_open.set(false);
                }
                Err(err) => messages.update(|m| m.set_error(err)),
            }
        }
    });

    AssetsViewModel {
        form,
        messages,
        dialog_open,
        create_action,
    }
}
