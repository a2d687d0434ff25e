pub mod create_form;
pub mod table;

pub use create_form::CreateAssetForm;
pub use table::AssetsTable;
