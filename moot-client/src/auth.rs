use moot_common::requests::{LoginRequest, RegisterRequest};
use moot_common::AuthResponse;

use crate::api::AuthApi;
use crate::error::Result;
use crate::http::ApiClient;

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.post("/auth/login", credentials).await?;
        self.set_token(&response.token);
        Ok(response)
    }

    async fn register(&self, details: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self.post("/auth/register", details).await?;
        self.set_token(&response.token);
        Ok(response)
    }

    fn adopt_token(&self, token: &str) {
        self.set_token(token);
    }

    fn discard_token(&self) {
        self.clear_token();
    }
}
