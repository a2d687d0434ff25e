use super::{repository::HoldingsRepository, utils::HoldingFormState};
use crate::{
    api::{
        holdings_path, portfolio_path, ApiClient, ApiError, CreateHolding, HoldingResponse,
        PortfolioResponse,
    },
    components::forms::MessageState,
    state::cache::{use_cache_snapshot, use_remote_cache, CacheSnapshot, RequestKey},
};
use leptos::*;
use std::rc::Rc;

/// What the header area shows for the portfolio record.
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioView {
    Loading,
    Missing,
    Ready(PortfolioResponse),
}

impl From<&CacheSnapshot> for PortfolioView {
    fn from(snapshot: &CacheSnapshot) -> Self {
        match snapshot.decode::<PortfolioResponse>() {
            Some(Ok(portfolio)) => PortfolioView::Ready(portfolio),
            Some(Err(_)) => PortfolioView::Missing,
            None if snapshot.error.is_some() => PortfolioView::Missing,
            None => PortfolioView::Loading,
        }
    }
}

#[derive(Clone, Copy)]
pub struct PortfolioDetailsViewModel {
    pub portfolio_id: StoredValue<String>,
    pub portfolio: Memo<PortfolioView>,
    pub holdings_count: Signal<usize>,
    pub form: RwSignal<HoldingFormState>,
    pub messages: RwSignal<MessageState>,
    pub dialog_open: RwSignal<bool>,
    pub add_action: Action<CreateHolding, Result<HoldingResponse, ApiError>>,
}

impl PortfolioDetailsViewModel {
    pub fn holdings_url(&self) -> String {
        self.portfolio_id.with_value(|id| holdings_path(id))
    }

    pub fn open_dialog(&self) {
        self.messages.update(MessageState::clear);
        self.dialog_open.set(true);
    }

    pub fn close_dialog(&self) {
        self.dialog_open.set(false);
    }

    pub fn submit(&self) {
        if self.add_action.pending().get_untracked() {
            return;
        }
        match self.form.with_untracked(HoldingFormState::to_request) {
            Ok(payload) => self.add_action.dispatch(payload),
            Err(err) => self.messages.update(|m| m.set_error(err)),
        }
    }
}

pub fn use_portfolio_details_view_model(portfolio_id: String) -> PortfolioDetailsViewModel {
    let client = use_context::<ApiClient>().unwrap_or_default();
    let repository = HoldingsRepository::new_with_client(Rc::new(client));
    let cache = use_remote_cache();

    let record = use_cache_snapshot(RequestKey::new(portfolio_path(&portfolio_id)));
    let holdings = use_cache_snapshot(RequestKey::new(holdings_path(&portfolio_id)));
    let portfolio = create_memo(move |_| record.with(|s| PortfolioView::from(s)));
    let holdings_count = Signal::derive(move || holdings.with(|s| s.items::<HoldingResponse>().len()));

    let form = create_rw_signal(HoldingFormState::default());
    let messages = create_rw_signal(MessageState::default());
    let dialog_open = create_rw_signal(false);
    let portfolio_id = store_value(portfolio_id);

    let add_action = create_action(move |payload: &CreateHolding| {
        let repo = repository.clone();
        let cache = cache.clone();
        let payload = payload.clone();
        let id = portfolio_id.get_value();
        async move {
            let result = repo.add_holding(id.clone(), payload).await;
            if result.is_ok() {
                cache.invalidate_path(&holdings_path(&id));
            }
            result
        }
    });

    create_effect(move |_| {
        if let Some(result) = add_action.value().get() {
            match result {
                Ok(holding) => {
                    log::info!("Added holding {}", holding.id);
                    messages.update(|m| m.set_success("Holding added."));
                    form.update(HoldingFormState::reset);
                    dialog_open.set(false);
                }
                Err(err) => messages.update(|m| m.set_error(err)),
            }
        }
    });

    PortfolioDetailsViewModel {
        portfolio_id,
        portfolio,
        holdings_count,
        form,
        messages,
        dialog_open,
        add_action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn portfolio_view_follows_snapshot() {
        assert_eq!(PortfolioView::from(&CacheSnapshot::default()), PortfolioView::Loading);
        let missing = CacheSnapshot {
            error: Some(ApiError::unknown("Not Found").with_status(404)),
            ..CacheSnapshot::default()
        };
        assert_eq!(PortfolioView::from(&missing), PortfolioView::Missing);
        let ready = CacheSnapshot {
            data: Some(json!({"id": 3, "name": "Crypto", "base_currency_id": 2, "user_id": 1})),
            ..CacheSnapshot::default()
        };
        assert!(matches!(PortfolioView::from(&ready), PortfolioView::Ready(p) if p.name == "Crypto"));
    }
}
