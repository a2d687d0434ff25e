use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <div class="mx-auto h-12 w-12 text-fg-muted">
                <i class="fas fa-folder-open text-4xl"></i>
            </div>
            <h3 class="mt-2 text-sm font-semibold text-fg">{title}</h3>
            {description.map(|desc| view! { <p class="mt-1 text-sm text-fg-muted">{desc}</p> })}
            {children.map(|children| view! { <div class="mt-4">{children()}</div> })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_title_description_and_action() {
        let html = render_to_string(|| {
            view! {
                <EmptyState title="Page Not Found" description="Nothing lives here">
                    <a href="/panel">"Go home"</a>
                </EmptyState>
            }
        });
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Nothing lives here"));
        assert!(html.contains("Go home"));
    }
}
