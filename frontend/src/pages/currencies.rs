use crate::{
    api::CURRENCIES_PATH,
    components::data_table::{cell_text, Column, DataTable},
};
use leptos::*;

pub fn currency_columns() -> Vec<Column> {
    vec![
        Column::new("id").header("ID"),
        Column::new("code").header("Code"),
        Column::new("name").header("Name"),
        Column::new("symbol").header("Symbol"),
        Column::new("is_fiat").header("Type").value(|row| {
            match row["is_fiat"].as_bool() {
                Some(true) => "Fiat".to_string(),
                Some(false) => "Crypto".to_string(),
                None => cell_text(&row["is_fiat"]),
            }
        }),
    ]
}

#[component]
pub fn CurrenciesPage() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h2 class="text-xl font-semibold text-fg">"Currencies"</h2>
            <DataTable url=CURRENCIES_PATH columns=currency_columns() />
        </div>
    }
}
