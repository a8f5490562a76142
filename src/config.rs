//! Configuration options for the Aqar client

use std::time::Duration;

use crate::i18n::Language;

/// Configuration options for the Aqar client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every gateway call
    pub request_timeout: Option<Duration>,

    /// The display language used for user-facing notifications
    pub language: Language,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            language: Language::English,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the notification display language
    pub fn with_language(mut self, value: Language) -> Self {
        self.language = value;
        self
    }
}
