use super::{repository::PortfoliosRepository, utils::PortfolioFormState};
use crate::{
    api::{ApiClient, ApiError, CreatePortfolio, PortfolioResponse, PORTFOLIOS_PATH},
    components::forms::MessageState,
    state::cache::{use_cache_snapshot, use_remote_cache, CacheSnapshot, RequestKey},
};
use leptos::*;
use leptos_router::use_navigate;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct PortfoliosViewModel {
    pub list: ReadSignal<CacheSnapshot>,
    pub form: RwSignal<PortfolioFormState>,
    pub messages: RwSignal<MessageState>,
    pub dialog_open: RwSignal<bool>,
    pub create_action: Action<CreatePortfolio, Result<PortfolioResponse, ApiError>>,
}

impl PortfoliosViewModel {
    pub fn portfolios(&self) -> Vec<PortfolioResponse> {
        self.list.with(|s| s.items::<PortfolioResponse>())
    }

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
        match self.form.with_untracked(PortfolioFormState::to_request) {
            Ok(payload) => self.create_action.dispatch(payload),
            Err(err) => self.messages.update(|m| m.set_error(err)),
        }
    }
}

pub fn use_portfolios_view_model() -> PortfoliosViewModel {
    let client = use_context::<ApiClient>().unwrap_or_default();
    let repository = PortfoliosRepository::new_with_client(Rc::new(client));
    let cache = use_remote_cache();
    let list = use_cache_snapshot(RequestKey::new(PORTFOLIOS_PATH));

    let form = create_rw_signal(PortfolioFormState::default());
    let messages = create_rw_signal(MessageState::default());
    let dialog_open = create_rw_signal(false);

    let create_action = create_action(move |payload: &CreatePortfolio| {
        let repo = repository.clone();
        let cache = cache.clone();
        let payload = payload.clone();
        async move {
            let result = repo.create_portfolio(payload).await;
            if result.is_ok() {
                cache.invalidate_path(PORTFOLIOS_PATH);
            }
            result
        }
    });

    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(portfolio) => {
                    log::info!("Created portfolio {}", portfolio.id);
                    form.update(PortfolioFormState::reset);
                    dialog_open.set(false);
                    let navigate = use_navigate();
                    navigate(
                        &format!("/panel/portfolios/{}", portfolio.id),
                        Default::default(),
                    );
                }
                Err(err) => messages.update(|m| m.set_error(err)),
            }
        }
    });

    PortfoliosViewModel {
        list,
        form,
        messages,
        dialog_open,
        create_action,
    }
}
