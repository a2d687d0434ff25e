use super::{
    client::ApiClient,
    types::{ApiError, AssetResponse, CreateAsset},
};

pub const ASSETS_PATH: &str = "/assets";
pub const ASSET_TYPES_PATH: &str = "/asset-types";
pub const CURRENCIES_PATH: &str = "/currencies";
pub const USERS_PATH: &str = "/users";

impl ApiClient {
    pub async fn create_asset(&self, payload: &CreateAsset) -> Result<AssetResponse, ApiError> {
        self.post(ASSETS_PATH, payload).await
    }
}
