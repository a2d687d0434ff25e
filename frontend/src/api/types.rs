use crate::utils::time::parse_timestamp;
use chrono::{DateTime, Utc};
use leptos::*;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

fn default_true() -> bool {
    true
}

impl UserResponse {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Accepts offset-aware and naive ISO timestamps.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub is_fiat: bool,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTypeResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetResponse {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub asset_type_id: i64,
    pub currency_id: i64,
    #[serde(default)]
    pub asset_type: Option<AssetTypeResponse>,
    #[serde(default)]
    pub currency: Option<CurrencyResponse>,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub asset_type_id: i64,
    pub currency_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub base_currency_id: i64,
    pub user_id: i64,
    #[serde(default, deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePortfolio {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub base_currency_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingResponse {
    pub id: i64,
    pub asset_id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub avg_purchase_price: Option<f64>,
    #[serde(default)]
    pub asset: Option<AssetResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHolding {
    pub asset_id: i64,
    pub quantity: f64,
}

/// List endpoints answer either with a bare array or with an envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Paged {
        #[serde(alias = "items", alias = "results")]
        result: Vec<T>,
        #[serde(default)]
        total: Option<i64>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) => items,
            ListResponse::Paged { result, .. } => result,
        }
    }

    pub fn total(&self) -> usize {
        match self {
            ListResponse::Plain(items) => items.len(),
            ListResponse::Paged { result, total } => total
                .and_then(|t| usize::try_from(t).ok())
                .unwrap_or(result.len()),
        }
    }
}

impl<T: DeserializeOwned> ListResponse<T> {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::unknown(format!("Failed to parse list response: {}", e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    AuthenticationRejected,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        let msg = msg.into();
        Self {
            error: if msg.trim().is_empty() {
                UNKNOWN_ERROR_MESSAGE.to_string()
            } else {
                msg
            },
            code: code.to_string(),
            details: None,
            status: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED").with_status(401)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        match self.code.as_str() {
            "REQUEST_FAILED" => ErrorKind::Transport,
            "UNAUTHORIZED" => ErrorKind::AuthenticationRejected,
            "VALIDATION_ERROR" => ErrorKind::Validation,
            _ => ErrorKind::Unknown,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::AuthenticationRejected
    }

    /// Builds an error from a non-success response body.
    ///
    /// The message comes from the first usable server field (`detail`,
    /// `message`, `error`), falling back to the HTTP reason phrase.
    pub fn from_response(status: u16, body: &[u8], reason: Option<&str>) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();
        let message = parsed
            .as_ref()
            .and_then(server_message)
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_default();
        let mut error = match status {
            401 => Self::unauthorized(message),
            422 => Self::validation(message),
            _ => Self::unknown(message),
        };
        error.status = Some(status);
        error.details = parsed.and_then(|v| v.get("detail").filter(|d| !d.is_string()).cloned());
        error
    }
}

fn server_message(body: &Value) -> Option<String> {
    for field in ["detail", "message", "error"] {
        match body.get(field) {
            Some(Value::String(text)) if !text.trim().is_empty() => return Some(text.clone()),
            Some(Value::Array(items)) => {
                // FastAPI validation errors: [{"loc": [...], "msg": "..."}]
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }
    }
    None
}
