use crate::{
    api::{ASSETS_PATH, PORTFOLIOS_PATH},
    state::cache::{use_cache_snapshot, CacheSnapshot, RequestKey},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Loading,
    Unavailable,
    Ready(usize),
}

impl From<&CacheSnapshot> for Count {
    fn from(snapshot: &CacheSnapshot) -> Self {
        if snapshot.data.is_some() {
            Count::Ready(snapshot.items::<serde_json::Value>().len())
        } else if snapshot.error.is_some() {
            Count::Unavailable
        } else {
            Count::Loading
        }
    }
}

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub portfolios: Signal<Count>,
    pub assets: Signal<Count>,
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    let portfolios = use_cache_snapshot(RequestKey::new(PORTFOLIOS_PATH));
    let assets = use_cache_snapshot(RequestKey::new(ASSETS_PATH));
    DashboardViewModel {
        portfolios: Signal::derive(move || portfolios.with(|s| Count::from(s))),
        assets: Signal::derive(move || assets.with(|s| Count::from(s))),
    }
}
