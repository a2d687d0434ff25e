pub mod cards;
pub mod combobox;
pub mod common;
pub mod data_table;
pub mod dialog;
pub mod empty_state;
pub mod error;
pub mod forms;
pub mod guard;
pub mod layout;
