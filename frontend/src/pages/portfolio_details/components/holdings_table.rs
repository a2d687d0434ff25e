use crate::components::data_table::{cell_text, Column, DataTable};
use leptos::*;

pub fn holding_columns() -> Vec<Column> {
    vec![
        Column::new("asset")
            .header("Asset")
            .value(|row| cell_text(&row["asset"]["name"])),
        Column::new("quantity").header("Quantity"),
    ]
}

#[component]
pub fn HoldingsTable(#[prop(into)] url: String) -> impl IntoView {
    view! { <DataTable url=url columns=holding_columns() /> }
}
