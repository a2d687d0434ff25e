pub mod assets;
pub mod currencies;
pub mod dashboard;
pub mod loading;
pub mod login;
pub mod not_found;
pub mod portfolio_details;
pub mod portfolios;
pub mod users;

pub use assets::AssetsPage;
pub use currencies::CurrenciesPage;
pub use dashboard::DashboardPage;
pub use loading::LoadingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use portfolio_details::PortfolioDetailsRoute;
pub use portfolios::PortfoliosPage;
pub use users::UsersPage;
