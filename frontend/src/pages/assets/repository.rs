use crate::api::{ApiClient, ApiError, AssetResponse, CreateAsset};
use std::rc::Rc;

#[derive(Clone)]
pub struct AssetsRepository {
    client: Rc<ApiClient>,
}

impl AssetsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn create_asset(&self, payload: CreateAsset) -> Result<AssetResponse, ApiError> {
        self.client.create_asset(&payload).await
    }
}
