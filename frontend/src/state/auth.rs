use crate::{
    api::{ApiClient, ApiError, LoginRequest, UserResponse},
    state::{
        cache::{use_remote_cache, RemoteCache},
        session::{Session, SessionController},
    },
};
use leptos::*;

#[derive(Clone)]
pub struct AuthContext {
    pub session: ReadSignal<Session>,
    pub controller: SessionController,
}

fn create_auth_context(client: ApiClient, cache: RemoteCache) -> AuthContext {
    let controller = SessionController::new(client.clone());
    let (session, set_session) = create_signal(controller.session());

    controller.subscribe(move |next| {
        set_session.set(next.clone());
        // Views are gone by now, so this only marks entries stale.
        if *next == Session::Unauthorized {
            cache.invalidate_all();
        }
    });

    let on_expired = controller.clone();
    client.set_unauthorized_hook(move || on_expired.expire());

    AuthContext {
        session,
        controller,
    }
}

/// Provides the API client, token store, cache and session to the tree and
/// restores any persisted session.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let client = use_context::<ApiClient>().unwrap_or_default();
    provide_context(client.clone());
    provide_context(client.token_store());
    let cache = RemoteCache::for_client(client.clone());
    provide_context(cache.clone());

    let ctx = create_auth_context(client, cache);
    provide_context(ctx.clone());

    let controller = ctx.controller;
    spawn_local(async move { controller.start().await });

    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        let client = use_context::<ApiClient>().unwrap_or_default();
        create_auth_context(client, use_remote_cache())
    })
}

pub fn use_session() -> ReadSignal<Session> {
    use_auth().session
}

pub fn use_current_user() -> Signal<Option<UserResponse>> {
    let session = use_session();
    Signal::derive(move || session.with(|s| s.user().cloned()))
}

pub fn use_login_action() -> Action<LoginRequest, Result<UserResponse, ApiError>> {
    let controller = use_auth().controller;
    create_action(move |request: &LoginRequest| {
        let controller = controller.clone();
        let request = request.clone();
        async move { controller.login(request).await }
    })
}

pub fn use_logout() -> Callback<()> {
    let controller = use_auth().controller;
    Callback::new(move |_| controller.logout())
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{test_support::mock::*, TokenStore};
    use crate::state::cache::{CachePolicy, RequestKey};
    use crate::utils::{task::testing::pool_spawner, timer::ManualTimer};
    use futures::executor::LocalPool;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn session_signal_follows_login_and_logout() {
        let mut pool = LocalPool::new();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/auth/access-token");
            then.status(200).json_body(json!({"access_token": "T1"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/users/me");
            then.status(200)
                .json_body(json!({"id": 1, "email": "a@b.com", "full_name": "Alice"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/assets");
            then.status(200).json_body(json!([]));
        });

        let runtime = create_runtime();
        let tokens = TokenStore::in_memory();
        let client =
            ApiClient::new_with_base_url(server.url("/api/v1")).with_token_store(tokens.clone());
        let cache = RemoteCache::with_client(
            client.clone(),
            pool_spawner(&pool),
            Rc::new(ManualTimer::new()),
            CachePolicy::default(),
        );
        let ctx = create_auth_context(client, cache.clone());

        let user = pool
            .run_until(ctx.controller.login(LoginRequest {
                username: "a@b.com".into(),
                password: "x".into(),
            }))
            .unwrap();
        assert_eq!(user.display_name(), "Alice");
        assert!(ctx.session.get_untracked().is_authorized());

        let assets = RequestKey::new("/assets");
        pool.run_until(cache.load(&assets)).unwrap();

        ctx.controller.logout();
        pool.run_until_stalled();
        assert_eq!(ctx.session.get_untracked(), Session::Unauthorized);
        assert!(tokens.get().is_none());
        // Data from the previous session is not served as fresh.
        assert_eq!(server.hits(GET, "/api/v1/assets"), 1);
        pool.run_until(cache.load(&assets)).unwrap();
        assert_eq!(server.hits(GET, "/api/v1/assets"), 2);
        runtime.dispose();
    }
}
