pub mod card;
pub mod create_form;

pub use card::{CreatePortfolioCard, PortfolioCard};
pub use create_form::CreatePortfolioForm;
