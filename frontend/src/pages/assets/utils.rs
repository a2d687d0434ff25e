use crate::{
    api::{ApiError, CreateAsset},
    components::forms::{parse_id, required},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFormState {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub is_active: bool,
    pub asset_type_id: Option<String>,
    pub currency_id: Option<String>,
}

impl Default for AssetFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            description: String::new(),
            is_active: true,
            asset_type_id: None,
            currency_id: None,
        }
    }
}

impl AssetFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<CreateAsset, ApiError> {
        let description = self.description.trim();
        Ok(CreateAsset {
            name: required(&self.name, "Name is required")?,
            symbol: required(&self.symbol, "Symbol is required")?,
            description: (!description.is_empty()).then(|| description.to_string()),
            is_active: self.is_active,
            asset_type_id: parse_id(
                self.asset_type_id.as_deref(),
                "Asset Type ID must be a positive number",
            )?,
            currency_id: parse_id(
                self.currency_id.as_deref(),
                "Currency ID must be a positive number",
            )?,
        })
    }
}
