use crate::{
    api::ASSETS_PATH,
    components::data_table::{cell_text, Column, DataTable},
    utils::time::format_timestamp,
};
use leptos::*;

pub fn asset_columns() -> Vec<Column> {
    vec![
        Column::new("id").header("ID"),
        Column::new("name").header("Name"),
        Column::new("symbol").header("Symbol"),
        Column::new("asset_type")
            .header("Asset Type")
            .value(|row| cell_text(&row["asset_type"]["name"])),
        Column::new("currency")
            .header("Currency")
            .value(|row| cell_text(&row["currency"]["name"])),
        Column::new("created_at")
            .header("Created At")
            .value(|row| row["created_at"].as_str().map(format_timestamp).unwrap_or_default()),
    ]
}

#[component]
pub fn AssetsTable() -> impl IntoView {
    view! { <DataTable url=ASSETS_PATH columns=asset_columns() /> }
}
