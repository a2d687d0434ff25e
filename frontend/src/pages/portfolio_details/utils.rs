use crate::{
    api::{ApiError, CreateHolding},
    components::forms::parse_id,
};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingFormState {
    pub asset_id: Option<String>,
    pub quantity: String,
}

impl HoldingFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<CreateHolding, ApiError> {
        let asset_id = parse_id(self.asset_id.as_deref(), "Asset ID must be a positive number")?;
        let quantity = self
            .quantity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite() && *q > 0.0)
            .ok_or_else(|| ApiError::validation("Quantity must be a positive number"))?;
        Ok(CreateHolding { asset_id, quantity })
    }
}

/// Selector label for an asset row: symbol first when known.
pub fn asset_label(row: &Value) -> String {
    let name = row["name"].as_str().unwrap_or_default();
    match row["symbol"].as_str().filter(|s| !s.is_empty()) {
        Some(symbol) => format!("{} {}", symbol, name),
        None => name.to_string(),
    }
}
