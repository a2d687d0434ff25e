use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use futures::future::{FutureExt, LocalBoxFuture};
use serde::de::DeserializeOwned;

use crate::{
    api::{ApiError, ListResponse},
    state::cache::{RemoteCache, RequestKey},
    utils::{
        task::Spawner,
        timer::{platform_timer, Timer, TimerHandle},
    },
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_SEARCH_PARAM: &str = "search";

type OptionSource = Rc<dyn Fn(String) -> LocalBoxFuture<'static, Result<Vec<SelectOption>, ApiError>>>;
type ChangeHandler = Rc<dyn Fn(Option<String>)>;
type Observer = Rc<dyn Fn(&SelectorState)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorState {
    pub search_term: String,
    pub options: Vec<SelectOption>,
    pub selected_value: Option<String>,
    pub selected_label: Option<String>,
    pub is_loading: bool,
}

impl SelectorState {
    fn label_for(&self, value: &str) -> Option<String> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.clone())
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_value.as_deref() == Some(value)
    }
}

#[derive(Clone)]
pub struct SelectorOptions {
    pub debounce: Duration,
    pub timer: Rc<dyn Timer>,
    pub spawner: Spawner,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            timer: platform_timer(),
            spawner: Spawner::default(),
        }
    }
}

struct Control {
    state: SelectorState,
    latest_seq: u64,
    debounce: Option<TimerHandle>,
    disposed: bool,
}

struct Inner {
    control: RefCell<Control>,
    source: OptionSource,
    options: SelectorOptions,
    on_change: RefCell<Option<ChangeHandler>>,
    observer: RefCell<Option<Observer>>,
}

impl Inner {
    fn publish(&self) {
        let snapshot = self.control.borrow().state.clone();
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
    }

    fn emit_change(&self, value: Option<String>) {
        let handler = self.on_change.borrow().clone();
        if let Some(handler) = handler {
            handler(value);
        }
    }
}

/// Debounced, cancellable search over a remote option list.
///
/// Every issued query carries a sequence number and only the response to the
/// most recent one is applied. After [`AsyncSelector::dispose`] nothing
/// mutates the state any more.
#[derive(Clone)]
pub struct AsyncSelector {
    inner: Rc<Inner>,
}

impl AsyncSelector {
    pub fn new<T: 'static>(
        source: impl Fn(String) -> LocalBoxFuture<'static, Result<Vec<T>, ApiError>> + 'static,
        label_of: impl Fn(&T) -> String + 'static,
        value_of: impl Fn(&T) -> String + 'static,
        options: SelectorOptions,
    ) -> Self {
        let label_of = Rc::new(label_of);
        let value_of = Rc::new(value_of);
        let source: OptionSource = Rc::new(move |term| {
            let pending = source(term);
            let label_of = label_of.clone();
            let value_of = value_of.clone();
            async move {
                let items = pending.await?;
                Ok(items
                    .iter()
                    .map(|item| SelectOption {
                        value: value_of(item),
                        label: label_of(item),
                    })
                    .collect())
            }
            .boxed_local()
        });

        Self {
            inner: Rc::new(Inner {
                control: RefCell::new(Control {
                    state: SelectorState::default(),
                    latest_seq: 0,
                    debounce: None,
                    disposed: false,
                }),
                source,
                options,
                on_change: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }

    pub fn set_on_change(&self, handler: impl Fn(Option<String>) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn set_observer(&self, observer: impl Fn(&SelectorState) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    pub fn snapshot(&self) -> SelectorState {
        self.inner.control.borrow().state.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.control.borrow().disposed
    }

    /// Initial load with an empty search term.
    pub fn mount(&self) {
        issue(&self.inner, String::new());
    }

    /// Records the term and restarts the quiet-period timer.
    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        let replaced = {
            let mut control = self.inner.control.borrow_mut();
            if control.disposed {
                return;
            }
            control.state.search_term = term.clone();
            let weak = Rc::downgrade(&self.inner);
            let handle = self.inner.options.timer.schedule(
                self.inner.options.debounce,
                Box::new(move || fire_debounce(&weak, term)),
            );
            control.debounce.replace(handle)
        };
        drop(replaced);
        self.inner.publish();
    }

    /// Picks `value`; picking the current selection clears it.
    pub fn select(&self, value: &str) {
        let next = {
            let mut control = self.inner.control.borrow_mut();
            if control.disposed {
                return;
            }
            let state = &mut control.state;
            if state.is_selected(value) {
                state.selected_value = None;
                state.selected_label = None;
                None
            } else {
                state.selected_label = state.label_for(value);
                state.selected_value = Some(value.to_string());
                Some(value.to_string())
            }
        };
        self.inner.publish();
        self.inner.emit_change(next);
    }

    /// Applies a value set from outside. Does not call the change handler.
    pub fn sync_value(&self, value: Option<String>) {
        {
            let mut control = self.inner.control.borrow_mut();
            if control.disposed {
                return;
            }
            let state = &mut control.state;
            state.selected_label = value.as_deref().and_then(|v| state.label_for(v));
            state.selected_value = value;
        }
        self.inner.publish();
    }

    /// Cancels the pending debounce and detaches any in-flight response.
    pub fn dispose(&self) {
        let pending = {
            let mut control = self.inner.control.borrow_mut();
            control.disposed = true;
            control.debounce.take()
        };
        drop(pending);
        self.inner.observer.borrow_mut().take();
        self.inner.on_change.borrow_mut().take();
    }
}

fn fire_debounce(inner: &Weak<Inner>, term: String) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let fired = inner.control.borrow_mut().debounce.take();
    drop(fired);
    issue(&inner, term);
}

fn issue(inner: &Rc<Inner>, term: String) {
    let seq = {
        let mut control = inner.control.borrow_mut();
        if control.disposed {
            return;
        }
        control.latest_seq += 1;
        control.state.is_loading = true;
        control.latest_seq
    };
    inner.publish();

    let pending = (inner.source)(term);
    let weak = Rc::downgrade(inner);
    inner.options.spawner.spawn(
        async move {
            let result = pending.await;
            if let Some(inner) = weak.upgrade() {
                apply(&inner, seq, result);
            }
        }
        .boxed_local(),
    );
}

fn apply(inner: &Inner, seq: u64, result: Result<Vec<SelectOption>, ApiError>) {
    {
        let mut control = inner.control.borrow_mut();
        if control.disposed {
            log::debug!("Selector disposed, dropping response #{}", seq);
            return;
        }
        if seq != control.latest_seq {
            log::debug!(
                "Discarding stale selector response #{} (latest #{})",
                seq,
                control.latest_seq
            );
            return;
        }
        let state = &mut control.state;
        state.is_loading = false;
        state.options = match result {
            Ok(options) => options,
            Err(err) => {
                log::warn!("Failed to fetch options: {}", err);
                Vec::new()
            }
        };
        if let Some(label) = state
            .selected_value
            .as_deref()
            .and_then(|value| state.label_for(value))
        {
            state.selected_label = Some(label);
        }
    }
    inner.publish();
}

/// Option source backed by the shared cache: `GET path?<search_param>=<term>`.
pub fn cached_source<T: DeserializeOwned + 'static>(
    cache: RemoteCache,
    path: impl Into<String>,
    search_param: impl Into<String>,
) -> impl Fn(String) -> LocalBoxFuture<'static, Result<Vec<T>, ApiError>> {
    let path = path.into();
    let search_param = search_param.into();
    move |term| {
        let key = RequestKey::new(path.clone()).with_param(search_param.clone(), term);
        let pending = cache.load(&key);
        async move {
            let value = pending.await?;
            ListResponse::<T>::from_value(value).map(ListResponse::into_items)
        }
        .boxed_local()
    }
}
