pub mod add_holding_form;
pub mod holdings_table;

pub use add_holding_form::AddHoldingForm;
pub use holdings_table::HoldingsTable;
