use super::{
    client::ApiClient,
    types::{ApiError, CreateHolding, CreatePortfolio, HoldingResponse, PortfolioResponse},
};

pub const PORTFOLIOS_PATH: &str = "/portfolios";

pub fn portfolio_path(id: &str) -> String {
    format!("{}/{}", PORTFOLIOS_PATH, id)
}

pub fn holdings_path(portfolio_id: &str) -> String {
    format!("{}/{}/holdings", PORTFOLIOS_PATH, portfolio_id)
}

impl ApiClient {
    pub async fn create_portfolio(
        &self,
        payload: &CreatePortfolio,
    ) -> Result<PortfolioResponse, ApiError> {
        self.post(PORTFOLIOS_PATH, payload).await
    }

    pub async fn get_portfolio(&self, id: &str) -> Result<PortfolioResponse, ApiError> {
        self.get(&portfolio_path(id), &[]).await
    }

    pub async fn create_holding(
        &self,
        portfolio_id: &str,
        payload: &CreateHolding,
    ) -> Result<HoldingResponse, ApiError> {
        self.post(&holdings_path(portfolio_id), payload).await
    }
}
