use crate::{
    api::USERS_PATH,
    components::data_table::{Column, DataTable},
};
use leptos::*;

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("email").header("Email"),
        Column::new("full_name").header("Full Name"),
        Column::new("is_active").header("Is Active"),
        Column::new("is_superuser").header("Is Super User"),
    ]
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h2 class="text-xl font-semibold text-fg">"Users"</h2>
            <DataTable url=USERS_PATH columns=user_columns() />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::warm_cache, ssr::render_to_string};
    use serde_json::json;

    #[test]
    fn lists_users_with_flags() {
        let cache = warm_cache(&[(
            "/users",
            json!([{"id": 1, "email": "admin@example.com", "full_name": null, "is_active": true, "is_superuser": true}]),
        )]);
        let html = render_to_string(move || {
            provide_context(cache);
            view! { <UsersPage /> }
        });
        assert!(html.contains("Is Super User"));
        assert!(html.contains("admin@example.com"));
        assert!(html.contains("true"));
    }
}
