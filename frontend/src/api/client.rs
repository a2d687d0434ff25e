use std::{cell::RefCell, rc::Rc};

use reqwest::{
    header::{HeaderMap, AUTHORIZATION},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    api::{token::TokenStore, types::ApiError},
    config,
};

pub type UnauthorizedHook = Rc<dyn Fn()>;

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn query(pairs: &[(&str, &str)]) -> Self {
        Self {
            query: owned_pairs(pairs),
            ..Self::default()
        }
    }

    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::validation(format!("Failed to encode request: {}", e)))?;
        Ok(Self {
            body: RequestBody::Json(value),
            ..Self::default()
        })
    }

    pub fn form(pairs: &[(&str, &str)]) -> Self {
        Self {
            body: RequestBody::Form(owned_pairs(pairs)),
            ..Self::default()
        }
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// Outbound HTTP choke point: bearer injection, 401 eviction and uniform
/// error translation all happen here.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    tokens: TokenStore,
    on_unauthorized: Rc<RefCell<Option<UnauthorizedHook>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            tokens: TokenStore::default(),
            on_unauthorized: Rc::new(RefCell::new(None)),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::new()
        }
    }

    pub fn with_token_store(mut self, tokens: TokenStore) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn token_store(&self) -> TokenStore {
        self.tokens.clone()
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Registers the callback run after any 401. Replaces the previous one.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + 'static) {
        *self.on_unauthorized.borrow_mut() = Some(Rc::new(hook));
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }
        self.tokens.clear();
        let hook = self.on_unauthorized.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute(Method::GET, path, RequestOptions::query(query))
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, RequestOptions::json(body)?)
            .await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute(Method::POST, path, RequestOptions::form(form))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::PUT, path, RequestOptions::json(body)?)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(Method::PATCH, path, RequestOptions::json(body)?)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        self.execute(Method::DELETE, path, RequestOptions::query(query))
            .await
    }

    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let label = format!("{} {}", method, path);
        let result = self.send(method, path, options).await.and_then(|raw| {
            self.handle_unauthorized_status(raw.status);
            if raw.status.is_success() {
                decode_body(&raw.body)
            } else {
                Err(ApiError::from_response(
                    raw.status.as_u16(),
                    &raw.body,
                    raw.status.canonical_reason(),
                ))
            }
        });
        if let Err(error) = &result {
            if error.is_unauthorized() {
                log::warn!("Request rejected: {}: {}", label, error);
            } else {
                log::error!("Request failed: {}: {}", label, error);
            }
        }
        result
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = join_url(&base_url, path);
        let RequestOptions {
            query,
            body,
            headers,
        } = options;

        let caller_sets_auth = headers.contains_key(AUTHORIZATION);
        let mut builder = self.http_client().request(method, &url).headers(headers);
        if !caller_sets_auth {
            if let Some(token) = self.tokens.get() {
                builder = builder.bearer_auth(token);
            }
        }
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder.form(&pairs),
        };

        let request = builder
            .build()
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;

        #[cfg(test)]
        if let Some(responder) = find_mock(request.url().as_str()) {
            let mock = responder.respond(&request)?;
            if let Some(gate) = mock.gate {
                let _ = gate.await;
            }
            return Ok(RawResponse {
                status: StatusCode::from_u16(mock.status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: mock.body,
            });
        }

        let response = self
            .http_client()
            .execute(request)
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let bytes: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
pub(crate) type MockGate =
    futures::future::Shared<futures::channel::oneshot::Receiver<()>>;

#[cfg(test)]
#[derive(Clone)]
pub(crate) struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// Reply is held back until the gate resolves.
    pub gate: Option<MockGate>,
}

#[cfg(test)]
impl MockResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: serde_json::to_vec(&body).unwrap_or_default(),
            gate: None,
        }
    }
}

#[cfg(test)]
pub(crate) trait TestResponder {
    fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
}

#[cfg(test)]
thread_local! {
    static MOCKS: RefCell<Vec<(String, Rc<dyn TestResponder>)>> = RefCell::new(Vec::new());
}

#[cfg(test)]
pub(crate) fn register_mock(base_url: String, responder: Rc<dyn TestResponder>) {
    MOCKS.with(|mocks| {
        let mut mocks = mocks.borrow_mut();
        mocks.retain(|(base, _)| base != &base_url);
        mocks.push((base_url, responder));
    });
}

#[cfg(test)]
fn find_mock(url: &str) -> Option<Rc<dyn TestResponder>> {
    MOCKS.with(|mocks| {
        mocks
            .borrow()
            .iter()
            .filter(|(base, _)| url.starts_with(base.as_str()))
            .max_by_key(|(base, _)| base.len())
            .map(|(_, responder)| responder.clone())
    })
}
