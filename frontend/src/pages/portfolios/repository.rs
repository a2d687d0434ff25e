use crate::api::{ApiClient, ApiError, CreatePortfolio, PortfolioResponse};
use std::rc::Rc;

#[derive(Clone)]
pub struct PortfoliosRepository {
    client: Rc<ApiClient>,
}

impl PortfoliosRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn create_portfolio(
        &self,
        payload: CreatePortfolio,
    ) -> Result<PortfolioResponse, ApiError> {
        self.client.create_portfolio(&payload).await
    }
}
