use super::utils::LoginFormState;
use crate::api::{ApiError, LoginRequest, UserResponse};
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<UserResponse, ApiError>>,
}

impl LoginViewModel {
    pub fn pending(&self) -> ReadSignal<bool> {
        self.login_action.pending()
    }

    /// Validates the form and dispatches the login unless one is running.
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        match self.form.to_request() {
            Ok(request) => {
                self.error.set(None);
                self.login_action.dispatch(request);
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    // On success the session gate swaps this page out.
    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.username.get().is_empty());
            assert!(!vm.pending().get());
        });
    }

    #[test]
    fn invalid_form_sets_error_without_dispatch() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.form.username.set("not-an-email".into());
            vm.form.password.set("admin".into());
            vm.submit();
            assert_eq!(
                vm.error.get_untracked().map(|e| e.error),
                Some("Please enter a valid email address".to_string())
            );
            assert_eq!(vm.login_action.version().get_untracked(), 0);
        });
    }
}
