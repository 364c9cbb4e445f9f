use moot_common::requests::UpdateProfileRequest;
use moot_common::{UserId, UserSummary};

use crate::api::UsersApi;
use crate::error::Result;
use crate::http::ApiClient;

impl UsersApi for ApiClient {
    async fn all_users(&self) -> Result<Vec<UserSummary>> {
        self.get("/users").await
    }

    async fn current_user(&self) -> Result<UserSummary> {
        self.get("/users/me").await
    }

    async fn user(&self, id: UserId) -> Result<UserSummary> {
        self.get(&format!("/users/{id}")).await
    }

    async fn update_profile(&self, profile: &UpdateProfileRequest) -> Result<UserSummary> {
        self.put("/users/me", profile).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.get_with_query("/users/search", &[("q", query)]).await
    }

    async fn follow(&self, id: UserId) -> Result<()> {
        self.post_empty(&format!("/users/{id}/follow")).await
    }

    async fn unfollow(&self, id: UserId) -> Result<()> {
        self.delete(&format!("/users/{id}/unfollow")).await
    }

    async fn followers(&self, id: UserId) -> Result<Vec<UserSummary>> {
        self.get(&format!("/users/{id}/followers")).await
    }

    async fn following(&self, id: UserId) -> Result<Vec<UserSummary>> {
        self.get(&format!("/users/{id}/following")).await
    }
}
