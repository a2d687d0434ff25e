use crate::{
    api::{ApiError, CreatePortfolio},
    components::forms::{parse_id, required},
};

pub const DEFAULT_BASE_CURRENCY: &str = "1";
pub const NO_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioFormState {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub base_currency_id: Option<String>,
}

impl Default for PortfolioFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
            base_currency_id: Some(DEFAULT_BASE_CURRENCY.to_string()),
        }
    }
}

impl PortfolioFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_request(&self) -> Result<CreatePortfolio, ApiError> {
        Ok(CreatePortfolio {
            name: required(&self.name, "Portfolio name is required")?,
            description: required(&self.description, "Description is required")?,
            is_active: self.is_active,
            base_currency_id: parse_id(
                self.base_currency_id.as_deref(),
                "Currency ID must be a positive number",
            )?,
        })
    }
}

pub fn description_or_placeholder(description: Option<&str>) -> String {
    description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_DESCRIPTION)
        .to_string()
}
