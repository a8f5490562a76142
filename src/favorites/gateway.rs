//! Typed HTTP wrapper for the favorites endpoints.
//!
//! Removal uses PUT: the server soft-removes the row rather than deleting
//! it, and the ack payload of every mutation is discarded by callers in
//! favor of the authoritative re-fetch that follows.

use reqwest::Client;

use super::types::{AddProjectFavorite, AddUnitFavorite, FavoritesSnapshot};
use crate::auth::Auth;
use crate::error::Error;
use crate::fetch::Fetch;

/// Gateway for the `/favorites` API surface
#[derive(Clone)]
pub struct Gateway {
    url: String,
    http_client: Client,
    auth: Auth,
}

impl Gateway {
    /// Create a new favorites gateway
    pub fn new(url: &str, http_client: Client, auth: Auth) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            http_client,
            auth,
        }
    }

    /// Fetch the user's combined favorites snapshot
    pub async fn user_favorites(&self, user_id: &str) -> Result<FavoritesSnapshot, Error> {
        let url = format!("{}/favorites/user-units-projects/{}", self.url, user_id);
        Fetch::get(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .execute()
            .await
    }

    /// Add a project to the user's favorites
    pub async fn add_project(&self, body: &AddProjectFavorite) -> Result<(), Error> {
        let url = format!("{}/favorites/project", self.url);
        Fetch::post(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .json(body)?
            .execute_ack()
            .await
    }

    /// Soft-remove a project from the user's favorites
    pub async fn remove_project(&self, project_id: u64) -> Result<(), Error> {
        let url = format!("{}/favorites/project", self.url);
        Fetch::put(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .query("projectId", project_id)
            .execute_ack()
            .await
    }

    /// Add a unit to the user's favorites
    pub async fn add_unit(&self, body: &AddUnitFavorite) -> Result<(), Error> {
        let url = format!("{}/favorites/unit", self.url);
        Fetch::post(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .json(body)?
            .execute_ack()
            .await
    }

    /// Soft-remove a unit from the user's favorites
    pub async fn remove_unit(&self, unit_id: u64) -> Result<(), Error> {
        let url = format!("{}/favorites/unit", self.url);
        Fetch::put(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .query("unitId", unit_id)
            .execute_ack()
            .await
    }
}
