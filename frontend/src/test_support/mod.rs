#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{ApiClient, TokenStore, UserResponse};
    use crate::state::{
        auth::AuthContext,
        session::{Session, SessionController},
    };
    use leptos::*;
    #[cfg(not(target_arch = "wasm32"))]
    use {
        crate::api::test_support::mock::*,
        crate::state::cache::{CachePolicy, RemoteCache, RequestKey},
        crate::utils::{
            task::{testing::pool_spawner, Spawner},
            timer::ManualTimer,
        },
        futures::executor::LocalPool,
        serde_json::Value,
        std::rc::Rc,
    };

    pub fn admin_user() -> UserResponse {
        UserResponse {
            id: 1,
            email: "admin@example.com".into(),
            full_name: Some("Admin User".into()),
            is_active: true,
            is_superuser: true,
        }
    }

    pub fn regular_user() -> UserResponse {
        UserResponse {
            id: 2,
            email: "member@example.com".into(),
            full_name: Some("Regular User".into()),
            is_active: true,
            is_superuser: false,
        }
    }

    /// Provides an auth context frozen at `session`.
    pub fn provide_session(session: Session) -> AuthContext {
        let client = ApiClient::new_with_base_url("http://localhost.invalid/api/v1")
            .with_token_store(TokenStore::in_memory());
        let (read, _) = create_signal(session);
        let ctx = AuthContext {
            session: read,
            controller: SessionController::new(client),
        };
        provide_context(ctx.clone());
        ctx
    }

    /// Cache preloaded with `(path, body)` pairs served by a mock server.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn warm_cache(entries: &[(&str, Value)]) -> RemoteCache {
        let mut pool = LocalPool::new();
        let server = MockServer::start();
        for (path, body) in entries {
            let body = body.clone();
            let key = RequestKey::from(*path);
            server.mock(|when, then| {
                when.method(GET).path(&format!("/api/v1{}", key.path()));
                then.status(200).json_body(body);
            });
        }
        let cache = RemoteCache::with_client(
            ApiClient::new_with_base_url(server.url("/api/v1")),
            pool_spawner(&pool),
            Rc::new(ManualTimer::new()),
            CachePolicy::default(),
        );
        for (path, _) in entries {
            let _ = pool.run_until(cache.load(&RequestKey::from(*path)));
        }
        cache
    }

    /// Provides a client and cache talking to `server`. Requests and actions
    /// run on `leptos::spawn_local`, so callers live inside a
    /// `tokio::task::LocalSet`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn provide_live_cache(server: &MockServer) -> RemoteCache {
        let client = ApiClient::new_with_base_url(server.url("/api/v1"))
            .with_token_store(TokenStore::in_memory());
        let cache = RemoteCache::with_client(
            client.clone(),
            Spawner::leptos(),
            Rc::new(ManualTimer::new()),
            CachePolicy::default(),
        );
        provide_context(client);
        provide_context(cache.clone());
        cache
    }

    /// Yields to spawned local tasks until `done` holds or the budget runs out.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn settle(mut done: impl FnMut() -> bool) {
        for _ in 0..100 {
            if done() {
                return;
            }
            tokio::task::yield_now().await;
        }
    }
}
