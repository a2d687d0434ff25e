use crate::api::{ApiClient, ApiError, CreateHolding, HoldingResponse};
use std::rc::Rc;

#[derive(Clone)]
pub struct HoldingsRepository {
    client: Rc<ApiClient>,
}

impl HoldingsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn add_holding(
        &self,
        portfolio_id: String,
        payload: CreateHolding,
    ) -> Result<HoldingResponse, ApiError> {
        self.client.create_holding(&portfolio_id, &payload).await
    }
}
