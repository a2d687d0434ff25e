use crate::api::{ApiError, LoginRequest};
use leptos::*;

pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_request(&self) -> Result<LoginRequest, ApiError> {
        let username = self.username.get_untracked().trim().to_string();
        let password = self.password.get_untracked();
        validate_credentials(&username, &password)?;
        Ok(LoginRequest { username, password })
    }
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    let username = username.trim();
    let valid_email = username
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.ends_with('.'))
        .unwrap_or(false);
    if !valid_email {
        return Err(ApiError::validation("Please enter a valid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn to_request_trims_username() {
        with_runtime(|| {
            let form = LoginFormState::default();
            form.username.set("  admin@example.com ".into());
            form.password.set("admin".into());
            let request = form.to_request().unwrap();
            assert_eq!(request.username, "admin@example.com");
            assert_eq!(request.password, "admin");
        });
    }
}
