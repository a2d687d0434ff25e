use std::rc::Rc;

use crate::state::cache::{use_cache_snapshot, use_remote_cache, CacheSnapshot, RequestKey};
use leptos::*;
use serde_json::Value;

pub const EMPTY_MESSAGE: &str = "No records found";

type CellFn = Rc<dyn Fn(&Value) -> String>;

/// Table column: a field name, optional header and optional cell getter.
#[derive(Clone)]
pub struct Column {
    name: &'static str,
    header: Option<&'static str>,
    value: Option<CellFn>,
}

impl Column {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            header: None,
            value: None,
        }
    }

    pub fn header(mut self, header: &'static str) -> Self {
        self.header = Some(header);
        self
    }

    pub fn value(mut self, getter: impl Fn(&Value) -> String + 'static) -> Self {
        self.value = Some(Rc::new(getter));
        self
    }

    pub fn title(&self) -> &'static str {
        self.header.unwrap_or(self.name)
    }

    pub fn render(&self, row: &Value) -> String {
        match &self.value {
            Some(getter) => getter(row),
            None => cell_text(row.get(self.name).unwrap_or(&Value::Null)),
        }
    }
}

pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Rows(Vec<Value>),
    Failed(String),
    Loading,
    Empty,
}

fn body_for(snapshot: &CacheSnapshot) -> Body {
    let rows = snapshot.items::<Value>();
    if !rows.is_empty() {
        Body::Rows(rows)
    } else if let Some(err) = &snapshot.error {
        Body::Failed(err.error.clone())
    } else if snapshot.is_loading {
        Body::Loading
    } else {
        Body::Empty
    }
}

/// List view bound to a cache key such as `/portfolios/7/holdings`.
#[component]
pub fn DataTable(
    #[prop(into)] url: String,
    columns: Vec<Column>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let cache = use_remote_cache();
    let key = RequestKey::from(url.as_str());
    let snapshot = use_cache_snapshot(key.clone());

    let span = columns.len().max(1);
    let headers = columns
        .iter()
        .map(|column| {
            view! {
                <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                    {column.title()}
                </th>
            }
        })
        .collect_view();
    let on_retry = move |_| cache.revalidate(&key);

    view! {
        <div class=format!("rounded-md border border-border overflow-x-auto {}", class)>
            <table class="min-w-full divide-y divide-border">
                <thead class="bg-surface-muted">
                    <tr>{headers}</tr>
                </thead>
                <tbody class="bg-surface-elevated divide-y divide-border">
                    {move || match snapshot.with(body_for) {
                        Body::Rows(rows) => rows
                            .into_iter()
                            .map(|row| {
                                let cells = columns
                                    .iter()
                                    .map(|column| {
                                        view! { <td class="px-4 py-3 text-sm text-fg">{column.render(&row)}</td> }
                                    })
                                    .collect_view();
                                view! { <tr>{cells}</tr> }
                            })
                            .collect_view(),
                        Body::Failed(message) => view! {
                            <tr>
                                <td colspan=span class="text-center py-4 text-sm text-status-error-text">
                                    <span>{message}</span>
                                    <button
                                        class="ml-3 underline text-action-primary-bg"
                                        on:click=on_retry.clone()
                                    >
                                        "Retry"
                                    </button>
                                </td>
                            </tr>
                        }
                        .into_view(),
                        Body::Loading => view! {
                            <tr>
                                <td colspan=span class="text-center py-4 text-sm text-fg-muted">"Loading..."</td>
                            </tr>
                        }
                        .into_view(),
                        Body::Empty => view! {
                            <tr>
                                <td colspan=span class="text-center py-4 text-sm text-fg-muted">{EMPTY_MESSAGE}</td>
                            </tr>
                        }
                        .into_view(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
