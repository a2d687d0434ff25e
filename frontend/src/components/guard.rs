use crate::state::{
    auth::{use_current_user, use_session},
    session::Session,
};
use leptos::*;

/// Which top-level tree a session maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Pending,
    SignIn,
    App,
}

pub fn gate_for(session: &Session) -> Gate {
    match session {
        Session::Idle | Session::Loading => Gate::Pending,
        Session::Authorized(_) => Gate::App,
        Session::Unauthorized => Gate::SignIn,
    }
}

/// Top-level view switch driven by the session.
///
/// Rebuilds only when the gate changes, so a profile refresh does not
/// remount the application.
#[component]
pub fn SessionGate(
    #[prop(into)] pending: ViewFn,
    #[prop(into)] sign_in: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let session = use_session();
    let gate = create_memo(move |_| session.with(gate_for));
    move || match gate.get() {
        Gate::Pending => pending.run(),
        Gate::SignIn => sign_in.run(),
        Gate::App => children().into_view(),
    }
}

#[component]
pub fn UnauthorizedMessage() -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 text-center">
            <p class="text-sm text-fg">"You need administrator access to view this page."</p>
        </div>
    }
}

/// Renders `children` for superusers only.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let user = use_current_user();
    let allowed = create_memo(move |_| user.with(|u| u.as_ref().is_some_and(|u| u.is_superuser)));
    view! {
        <Show when=move || allowed.get() fallback=|| view! { <UnauthorizedMessage /> }>
            {children()}
        </Show>
    }
}
