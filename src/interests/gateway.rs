//! Typed HTTP wrapper for the interest-record endpoints.
//!
//! Unlike favorites removal, interest removal is a hard DELETE.

use reqwest::Client;

use super::types::InterestedSnapshot;
use crate::auth::Auth;
use crate::error::Error;
use crate::fetch::Fetch;

/// Gateway for the `/interests` API surface
#[derive(Clone)]
pub struct Gateway {
    url: String,
    http_client: Client,
    auth: Auth,
}

impl Gateway {
    /// Create a new interests gateway
    pub fn new(url: &str, http_client: Client, auth: Auth) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            http_client,
            auth,
        }
    }

    /// Fetch the user's combined interest-record snapshot
    pub async fn user_interests(&self, user_id: &str) -> Result<InterestedSnapshot, Error> {
        let url = format!("{}/interests/user-units-projects/{}", self.url, user_id);
        Fetch::get(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .execute()
            .await
    }

    /// Delete an interest record targeting a project
    pub async fn remove_project(&self, project_id: u64) -> Result<(), Error> {
        let url = format!("{}/interests/project", self.url);
        Fetch::delete(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .query("projectId", project_id)
            .execute_ack()
            .await
    }

    /// Delete an interest record targeting a unit
    pub async fn remove_unit(&self, unit_id: u64) -> Result<(), Error> {
        let url = format!("{}/interests/unit", self.url);
        Fetch::delete(&self.http_client, &url)
            .bearer(self.auth.access_token())
            .query("unitId", unit_id)
            .execute_ack()
            .await
    }
}
