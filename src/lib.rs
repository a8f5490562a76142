//! Aqar Favorites Client Library
//!
//! A Rust client for the Aqar real-estate API's favorites and interest-record
//! surface: typed HTTP gateways, in-memory snapshot stores kept consistent
//! with the server through full authoritative re-fetches, and UI-facing
//! bindings that follow authentication transitions.

pub mod auth;
pub mod bindings;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetch;
pub mod i18n;
pub mod interests;
pub mod notify;

use std::sync::Arc;

use reqwest::Client;

use crate::auth::Auth;
use crate::bindings::FavoritesBindings;
use crate::config::ClientOptions;
use crate::favorites::FavoritesStore;
use crate::i18n::{Language, LanguagePreference};
use crate::interests::InterestsStore;
use crate::notify::{LogNotifier, Notifier};

/// The main entry point for the Aqar client
pub struct Aqar {
    /// The base URL for the Aqar REST API
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Auth collaborator supplying the current user id and bearer token
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
    language: LanguagePreference,
    favorites: FavoritesStore,
    interests: InterestsStore,
}

impl Aqar {
    /// Create a new Aqar client with default options and a log-backed
    /// notification sink
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aqar_client::Aqar;
    ///
    /// let aqar = Aqar::new("https://api.aqar.example.com");
    /// ```
    pub fn new(api_url: &str) -> Self {
        Self::new_with_options(api_url, ClientOptions::default(), Arc::new(LogNotifier))
    }

    /// Create a new Aqar client with custom options and notification sink
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use aqar_client::config::ClientOptions;
    /// use aqar_client::i18n::Language;
    /// use aqar_client::notify::ChannelNotifier;
    /// use aqar_client::Aqar;
    ///
    /// let options = ClientOptions::default().with_language(Language::Arabic);
    /// let (notifier, _toasts) = ChannelNotifier::new();
    /// let aqar = Aqar::new_with_options(
    ///     "https://api.aqar.example.com",
    ///     options,
    ///     Arc::new(notifier),
    /// );
    /// ```
    pub fn new_with_options(
        api_url: &str,
        options: ClientOptions,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let url = api_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|_| Client::new());

        let auth = Auth::new();
        let language = LanguagePreference::new(options.language);

        let favorites = FavoritesStore::new(
            &url,
            http_client.clone(),
            auth.clone(),
            Arc::clone(&notifier),
            language.clone(),
        );
        let interests = InterestsStore::new(
            &url,
            http_client.clone(),
            auth.clone(),
            notifier,
            language.clone(),
        );

        Self {
            url,
            http_client,
            auth,
            options,
            language,
            favorites,
            interests,
        }
    }

    /// Get a reference to the auth collaborator
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the favorites store
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Get a reference to the interests store
    pub fn interests(&self) -> &InterestsStore {
        &self.interests
    }

    /// Create consumer bindings for presentation code
    pub fn bindings(&self) -> FavoritesBindings {
        FavoritesBindings::new(
            self.auth.clone(),
            self.favorites.clone(),
            self.interests.clone(),
        )
    }

    /// The active display language for notifications
    pub fn language(&self) -> Language {
        self.language.get()
    }

    /// Switch the display language; takes effect on the next notification
    pub fn set_language(&self, language: Language) {
        self.language.set(language);
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::Session;
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::i18n::Language;
    pub use crate::notify::{Notifier, Severity};
    pub use crate::Aqar;
}
