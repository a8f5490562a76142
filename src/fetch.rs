//! HTTP request plumbing shared by the favorites and interests gateways.
//!
//! Maps transport and response failures onto the crate's error taxonomy:
//! a request that never reaches the server is [`Error::Network`], a
//! non-success status is [`Error::Http`] with the server's own message when
//! the body carries one, and a success body of the wrong shape is
//! [`Error::MalformedResponse`] rather than a silently defaulted value.

use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::error::Error;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    bearer_token: Option<String>,
    query_params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl<'a> FetchBuilder<'a> {
    /// Create a new FetchBuilder
    pub fn new(client: &'a Client, url: &str, method: Method) -> Self {
        Self {
            client,
            url: url.to_string(),
            method,
            bearer_token: None,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Attach bearer token authentication when a token is present
    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    /// Add a query parameter to the request
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let value =
            serde_json::to_value(body).map_err(|err| Error::malformed(err.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    async fn dispatch(self) -> Result<reqwest::Response, Error> {
        let mut url = Url::parse(&self.url)?;
        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method, url);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &self.body {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http(status, error_message(status, &body)));
        }

        Ok(response)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T, Error> {
        let response = self.dispatch().await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| Error::malformed(err))
    }

    /// Execute the request, checking only for a success status.
    ///
    /// Used by mutation endpoints whose ack payload the caller discards.
    pub async fn execute_ack(self) -> Result<(), Error> {
        self.dispatch().await?;
        Ok(())
    }
}

/// Extract the most useful error message from a failure response body.
///
/// The backend wraps its failures as `{"message": "..."}`; everything else
/// falls back to the raw body, then to the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Helper for creating HTTP requests
pub struct Fetch;

impl Fetch {
    /// Create a GET request
    pub fn get<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::GET)
    }

    /// Create a POST request
    pub fn post<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::POST)
    }

    /// Create a PUT request
    pub fn put<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::PUT)
    }

    /// Create a DELETE request
    pub fn delete<'a>(client: &'a Client, url: &str) -> FetchBuilder<'a> {
        FetchBuilder::new(client, url, Method::DELETE)
    }
}
