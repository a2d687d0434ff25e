use super::{
    client::ApiClient,
    types::{ApiError, LoginRequest, TokenResponse, UserResponse},
};

impl ApiClient {
    /// Exchanges credentials for a bearer token. Does not store it.
    pub async fn exchange_credentials(
        &self,
        request: &LoginRequest,
    ) -> Result<TokenResponse, ApiError> {
        self.post_form(
            "/auth/access-token",
            &[
                ("username", request.username.as_str()),
                ("password", request.password.as_str()),
            ],
        )
        .await
    }

    pub async fn get_me(&self) -> Result<UserResponse, ApiError> {
        self.get("/users/me", &[]).await
    }
}
