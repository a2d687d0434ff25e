use crate::{
    api::UserResponse,
    state::auth::{use_current_user, use_logout},
};
use leptos::*;

pub const APP_NAME: &str = "Fibook";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub admin: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        title: "Dashboard",
        href: "/panel",
        icon: "fas fa-gauge",
        admin: false,
    },
    NavItem {
        title: "Portfolios",
        href: "/panel/portfolios",
        icon: "fas fa-briefcase",
        admin: false,
    },
    NavItem {
        title: "Assets",
        href: "/panel/assets",
        icon: "fas fa-coins",
        admin: false,
    },
    NavItem {
        title: "Users",
        href: "/panel/users",
        icon: "fas fa-users",
        admin: true,
    },
    NavItem {
        title: "Currencies",
        href: "/panel/currencies",
        icon: "fas fa-dollar-sign",
        admin: true,
    },
];

/// Navigation entries visible to `user`; admin entries need a superuser.
pub fn nav_items_for(user: Option<&UserResponse>) -> Vec<NavItem> {
    let superuser = user.map(|u| u.is_superuser).unwrap_or(false);
    NAV_ITEMS
        .iter()
        .filter(|item| superuser || !item.admin)
        .copied()
        .collect()
}

#[component]
pub fn Sidebar(#[prop(into)] current_path: Signal<String>) -> impl IntoView {
    let user = use_current_user();
    let items = move || nav_items_for(user.get().as_ref());

    view! {
        <aside class="w-64 shrink-0 border-r border-border bg-surface-elevated min-h-screen">
            <div class="flex items-center gap-3 px-4 py-4 border-b border-border">
                <div class="flex h-8 w-8 items-center justify-center rounded-lg bg-action-primary-bg text-action-primary-text">
                    <i class="fas fa-layer-group"></i>
                </div>
                <div class="flex flex-col leading-none">
                    <span class="font-semibold text-fg">
                        {move || user.get().map(|u| u.email).unwrap_or_default()}
                    </span>
                    <span class="text-xs text-fg-muted">
                        {move || user.get().and_then(|u| u.full_name).unwrap_or_default()}
                    </span>
                </div>
            </div>
            <nav class="px-2 py-4 space-y-1">
                <p class="px-3 pb-2 text-xs font-medium text-fg-muted uppercase">"Main Menu"</p>
                {move || {
                    items()
                        .into_iter()
                        .map(|item| {
                            let active = move || current_path.get() == item.href;
                            view! {
                                <a
                                    href=item.href
                                    class=move || {
                                        if active() {
                                            "flex items-center gap-2 px-3 py-2 rounded-md text-sm font-medium bg-action-ghost-bg-hover text-fg"
                                        } else {
                                            "flex items-center gap-2 px-3 py-2 rounded-md text-sm font-medium text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                                        }
                                    }
                                >
                                    <i class=item.icon></i>
                                    <span>{item.title}</span>
                                </a>
                            }
                        })
                        .collect_view()
                }}
            </nav>
        </aside>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let user = use_current_user();
    let logout = use_logout();

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="flex justify-between items-center h-16 px-6">
                <h1 class="text-xl font-semibold text-fg">{APP_NAME}</h1>
                <div class="flex items-center gap-4">
                    <span class="text-sm text-fg-muted">
                        {move || user.get().map(|u| u.display_name().to_string()).unwrap_or_default()}
                    </span>
                    <button
                        on:click=move |_| logout.call(())
                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                    >
                        "Logout"
                    </button>
                </div>
            </div>
        </header>
    }
}

/// Sidebar, header and a content area.
#[component]
pub fn DashboardLayout(
    #[prop(into)] current_path: Signal<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-surface">
            <Sidebar current_path=current_path />
            <div class="flex flex-col flex-1">
                <Header />
                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, regular_user};

    #[test]
    fn admin_entries_need_superuser() {
        let titles = |user: Option<&UserResponse>| {
            nav_items_for(user)
                .into_iter()
                .map(|item| item.title)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            titles(Some(&regular_user())),
            vec!["Dashboard", "Portfolios", "Assets"]
        );
        assert_eq!(titles(None), vec!["Dashboard", "Portfolios", "Assets"]);
        assert_eq!(
            titles(Some(&admin_user())),
            vec!["Dashboard", "Portfolios", "Assets", "Users", "Currencies"]
        );
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::Session;
    use crate::test_support::helpers::{admin_user, provide_session, regular_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn sidebar_shows_profile_and_admin_links() {
        let html = render_to_string(move || {
            provide_session(Session::Authorized(admin_user()));
            view! { <Sidebar current_path=Signal::derive(|| "/panel/users".to_string()) /> }
        });
        assert!(html.contains("admin@example.com"));
        assert!(html.contains("Currencies"));
        assert!(html.contains("/panel/users"));
    }

    #[test]
    fn layout_renders_children_with_logout() {
        let html = render_to_string(move || {
            provide_session(Session::Authorized(regular_user()));
            view! { <DashboardLayout current_path=Signal::derive(|| "/panel".to_string())><div>"child"</div></DashboardLayout> }
        });
        assert!(html.contains("child"));
        assert!(html.contains("Logout"));
        assert!(!html.contains("Currencies"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                    <SuccessMessage message="ok" />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
