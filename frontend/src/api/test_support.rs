#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockGate, MockResponse, TestResponder};
    use crate::api::ApiError;
    use futures::{channel::oneshot, FutureExt};
    use reqwest::Method;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;

    /// Request as seen by the mock, for assertions.
    #[derive(Clone, Debug)]
    pub struct Recorded {
        pub method: Method,
        pub path: String,
        pub query: Vec<(String, String)>,
        pub authorization: Option<String>,
        pub body: Option<String>,
    }

    impl Recorded {
        pub fn param(&self, name: &str) -> Option<&str> {
            self.query
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    #[derive(Clone)]
    pub struct MockServer {
        inner: Rc<RefCell<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
        requests: Vec<Recorded>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        response: MockResponse,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Rc::new(RefCell::new(Inner {
                    routes: Vec::new(),
                    requests: Vec::new(),
                })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Rc::new(self.clone()));
            base_url
        }

        /// Later mocks for the same route take precedence.
        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            self.push_route(f, None);
        }

        /// Like [`MockServer::mock`], but each reply waits until the returned
        /// sender fires or is dropped.
        pub fn mock_deferred<F>(&self, f: F) -> oneshot::Sender<()>
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let (release, gate) = oneshot::channel();
            self.push_route(f, Some(gate.shared()));
            release
        }

        fn push_route<F>(&self, f: F, gate: Option<MockGate>)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let mut response = MockResponse::json(
                then.status.unwrap_or(200),
                then.body.unwrap_or_else(|| serde_json::json!({})),
            );
            response.gate = gate;

            self.inner.borrow_mut().routes.push(Route {
                method,
                path,
                response,
            });
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.inner.borrow().requests.clone()
        }

        pub fn hits(&self, method: Method, path: &str) -> usize {
            self.inner
                .borrow()
                .requests
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let recorded = Recorded {
                method: method.clone(),
                path: path.clone(),
                query: request
                    .url()
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
                authorization: request
                    .headers()
                    .get(reqwest::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: request
                    .body()
                    .and_then(|b| b.as_bytes())
                    .map(|b| String::from_utf8_lossy(b).into_owned()),
            };

            let mut inner = self.inner.borrow_mut();
            inner.requests.push(recorded);
            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| route.method == method && route.path == path)
                .cloned();

            route
                .map(|route| route.response)
                .ok_or_else(|| ApiError::request_failed(format!("No mock for {} {}", method, path)))
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
