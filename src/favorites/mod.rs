//! In-memory favorites store kept in sync with the remote API.
//!
//! The store owns the snapshot exclusively; consumers only read through
//! accessors. Every successful mutation is followed by a full authoritative
//! re-fetch, so the snapshot is always a mirror of server state as of the
//! last successful fetch, never a locally derived delta. Gateway errors are
//! caught at this boundary and converted to a localized notification; the
//! only contract callers can rely on is the store's own state fields.

pub mod gateway;
pub mod types;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use log::{debug, error, info, warn};
use reqwest::Client;

use crate::auth::Auth;
use crate::error::Error;
use crate::i18n::{LanguagePreference, Notice};
use crate::notify::{Notifier, Severity};
use self::gateway::Gateway;
use self::types::{AddProjectFavorite, AddUnitFavorite, FavoritesSnapshot};

/// Identifies the entity a mutation is acting on, for in-flight coalescing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Project(u64),
    Unit(u64),
}

#[derive(Debug, Default)]
struct State {
    snapshot: FavoritesSnapshot,
    is_loading: bool,
    error: Option<String>,
}

/// Removes the target from the in-flight set when the mutation finishes,
/// whichever path it takes out
struct InFlightGuard {
    set: Arc<Mutex<HashSet<Target>>>,
    target: Target,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.target);
    }
}

/// The favorites store
#[derive(Clone)]
pub struct FavoritesStore {
    gateway: Gateway,
    auth: Auth,
    notifier: Arc<dyn Notifier>,
    language: LanguagePreference,
    state: Arc<RwLock<State>>,
    in_flight: Arc<Mutex<HashSet<Target>>>,
}

impl FavoritesStore {
    /// Create a new favorites store
    pub fn new(
        url: &str,
        http_client: Client,
        auth: Auth,
        notifier: Arc<dyn Notifier>,
        language: LanguagePreference,
    ) -> Self {
        Self {
            gateway: Gateway::new(url, http_client, auth.clone()),
            auth,
            notifier,
            language,
            state: Arc::new(RwLock::new(State::default())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Replace the snapshot with the server's authoritative favorites list.
    ///
    /// No-op without a signed-in user. On failure the previous snapshot is
    /// preserved (stale-but-available) and the error message is recorded, so
    /// a transient network blip never blanks out the visible list.
    pub async fn refresh(&self) {
        let Some(user_id) = self.auth.user_id() else {
            debug!("favorites refresh skipped: no signed-in user");
            return;
        };

        self.set_loading(true);
        match self.gateway.user_favorites(&user_id).await {
            Ok(snapshot) => {
                info!(
                    "favorites refreshed for {}: {} projects, {} units",
                    user_id, snapshot.total_projects, snapshot.total_units
                );
                let mut state = self.state.write().unwrap();
                state.snapshot = snapshot;
                state.error = None;
                state.is_loading = false;
            }
            Err(err) => {
                error!("favorites refresh failed for {}: {}", user_id, err);
                self.notify(Severity::Error, Notice::FavoritesLoadFailed);
                let mut state = self.state.write().unwrap();
                state.error = Some(err.to_string());
                state.is_loading = false;
            }
        }
    }

    /// Add a project to the user's favorites and re-fetch the snapshot
    pub async fn add_project_to_favorites(&self, project_id: u64) {
        let Some(user_id) = self.require_user("add project to favorites") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Project(project_id)) else {
            return;
        };

        self.set_loading(true);
        let body = AddProjectFavorite {
            user_id,
            project_id,
            is_available: true,
        };
        match self.gateway.add_project(&body).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::ProjectFavoriteAdded);
            }
            Err(err) => {
                error!("adding project {} to favorites failed: {}", project_id, err);
                self.notify(Severity::Error, Notice::ProjectFavoriteAddFailed);
                self.set_loading(false);
            }
        }
    }

    /// Remove a project from the user's favorites and re-fetch the snapshot
    pub async fn remove_project_from_favorites(&self, project_id: u64) {
        let Some(_user_id) = self.require_user("remove project from favorites") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Project(project_id)) else {
            return;
        };

        self.set_loading(true);
        match self.gateway.remove_project(project_id).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::ProjectFavoriteRemoved);
            }
            Err(err) => {
                error!(
                    "removing project {} from favorites failed: {}",
                    project_id, err
                );
                self.notify(Severity::Error, Notice::ProjectFavoriteRemoveFailed);
                self.set_loading(false);
            }
        }
    }

    /// Add a unit to the user's favorites and re-fetch the snapshot
    pub async fn add_unit_to_favorites(&self, unit_id: u64) {
        let Some(user_id) = self.require_user("add unit to favorites") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Unit(unit_id)) else {
            return;
        };

        self.set_loading(true);
        let body = AddUnitFavorite {
            user_id,
            unit_id,
            is_available: true,
        };
        match self.gateway.add_unit(&body).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::UnitFavoriteAdded);
            }
            Err(err) => {
                error!("adding unit {} to favorites failed: {}", unit_id, err);
                self.notify(Severity::Error, Notice::UnitFavoriteAddFailed);
                self.set_loading(false);
            }
        }
    }

    /// Remove a unit from the user's favorites and re-fetch the snapshot
    pub async fn remove_unit_from_favorites(&self, unit_id: u64) {
        let Some(_user_id) = self.require_user("remove unit from favorites") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Unit(unit_id)) else {
            return;
        };

        self.set_loading(true);
        match self.gateway.remove_unit(unit_id).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::UnitFavoriteRemoved);
            }
            Err(err) => {
                error!("removing unit {} from favorites failed: {}", unit_id, err);
                self.notify(Severity::Error, Notice::UnitFavoriteRemoveFailed);
                self.set_loading(false);
            }
        }
    }

    /// Whether the project is in the current snapshot.
    ///
    /// Recomputed per call against the snapshot; membership is never cached
    /// outside the store. O(n) scan, favorites lists are tens of items.
    pub fn is_project_favorited(&self, project_id: u64) -> bool {
        self.state
            .read()
            .unwrap()
            .snapshot
            .favorite_projects
            .iter()
            .any(|project| project.project_id == project_id)
    }

    /// Whether the unit is in the current snapshot
    pub fn is_unit_favorited(&self, unit_id: u64) -> bool {
        self.state
            .read()
            .unwrap()
            .snapshot
            .favorite_units
            .iter()
            .any(|unit| unit.unit_id == unit_id)
    }

    /// Empty all arrays and zero all counts, synchronously.
    ///
    /// Called on sign-out; no per-user data may survive the auth boundary.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.snapshot = FavoritesSnapshot::default();
        state.error = None;
        state.is_loading = false;
    }

    /// A copy of the current snapshot
    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.state.read().unwrap().snapshot.clone()
    }

    pub fn total_projects(&self) -> u32 {
        self.state.read().unwrap().snapshot.total_projects
    }

    pub fn total_units(&self) -> u32 {
        self.state.read().unwrap().snapshot.total_units
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().is_loading
    }

    /// The error recorded by the most recent failed operation, if any
    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    fn set_loading(&self, value: bool) {
        self.state.write().unwrap().is_loading = value;
    }

    /// Resolve the signed-in user id, emitting the sign-in notice when absent
    fn require_user(&self, operation: &str) -> Option<String> {
        match self.auth.user_id() {
            Some(user_id) => Some(user_id),
            None => {
                warn!("{} rejected: {}", operation, Error::AuthRequired);
                self.notify(Severity::Info, Notice::SignInRequired);
                None
            }
        }
    }

    /// Register a mutation target; a second mutation on the same entity
    /// while one is pending is coalesced to a no-op
    fn begin(&self, target: Target) -> Option<InFlightGuard> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(target) {
            debug!("coalesced duplicate mutation on {:?}", target);
            return None;
        }
        Some(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            target,
        })
    }

    fn notify(&self, severity: Severity, notice: Notice) {
        self.notifier.notify(severity, notice.text(self.language.get()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::i18n::Language;
    use crate::notify::{ChannelNotifier, Notification};
    use tokio::sync::mpsc::UnboundedReceiver;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_against(
        server_uri: &str,
        auth: Auth,
    ) -> (FavoritesStore, UnboundedReceiver<Notification>) {
        let (notifier, receiver) = ChannelNotifier::new();
        let store = FavoritesStore::new(
            server_uri,
            Client::new(),
            auth,
            Arc::new(notifier),
            LanguagePreference::new(Language::English),
        );
        (store, receiver)
    }

    fn empty_snapshot_json() -> serde_json::Value {
        serde_json::json!({
            "favoriteProjects": [],
            "favoriteUnits": [],
            "totalProjects": 0,
            "totalUnits": 0
        })
    }

    #[test]
    fn refresh_is_a_noop_without_a_user() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(empty_snapshot_json()))
                .expect(0)
                .mount(&mock_server)
                .await;

            let (store, mut receiver) = store_against(&mock_server.uri(), Auth::new());
            store.refresh().await;

            assert!(!store.is_loading());
            assert!(store.error().is_none());
            assert!(receiver.try_recv().is_err());
        });
    }

    #[test]
    fn unauthenticated_mutation_emits_one_sign_in_notice_and_no_requests() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .expect(0)
                .mount(&mock_server)
                .await;

            let (store, mut receiver) = store_against(&mock_server.uri(), Auth::new());
            store.add_project_to_favorites(42).await;

            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.severity, Severity::Info);
            assert_eq!(notice.message, "Please sign in first");
            assert!(receiver.try_recv().is_err());
        });
    }

    #[test]
    fn sign_in_notice_follows_the_active_language() {
        tokio_test::block_on(async {
            let (notifier, mut receiver) = ChannelNotifier::new();
            let language = LanguagePreference::new(Language::English);
            let store = FavoritesStore::new(
                "http://localhost:1",
                Client::new(),
                Auth::new(),
                Arc::new(notifier),
                language.clone(),
            );

            language.set(Language::Arabic);
            store.add_unit_to_favorites(7).await;

            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.message, "يرجى تسجيل الدخول أولاً");
        });
    }

    #[test]
    fn failed_refresh_preserves_previous_snapshot() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/favorites/user-units-projects/u1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "favoriteProjects": [{
                        "userId": "u1",
                        "projectId": 42,
                        "nameAr": "برج النخيل",
                        "nameEn": "Palm Tower",
                        "price": 1_250_000.0,
                        "location": "Riyadh",
                        "mainImageUrl": null
                    }],
                    "favoriteUnits": [],
                    "totalProjects": 1,
                    "totalUnits": 0
                })))
                .up_to_n_times(1)
                .mount(&mock_server)
                .await;

            Mock::given(method("GET"))
                .and(path("/favorites/user-units-projects/u1"))
                .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                    "message": "backend unavailable"
                })))
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            store.refresh().await;
            assert!(store.is_project_favorited(42));
            assert!(store.error().is_none());

            store.refresh().await;
            assert!(store.is_project_favorited(42), "stale snapshot must survive");
            assert_eq!(store.total_projects(), 1);
            assert!(!store.is_loading());
            assert!(store.error().unwrap().contains("backend unavailable"));

            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.severity, Severity::Error);
        });
    }

    #[test]
    fn malformed_snapshot_body_is_a_hard_failure() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({"unexpected": "shape"})),
                )
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            store.refresh().await;

            assert_eq!(store.snapshot(), FavoritesSnapshot::default());
            assert!(store.error().unwrap().contains("malformed response"));
            assert_eq!(receiver.try_recv().unwrap().severity, Severity::Error);
        });
    }

    #[test]
    fn concurrent_mutations_on_one_entity_coalesce_to_a_single_request() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/favorites/project"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({}))
                        .set_delay(std::time::Duration::from_millis(200)),
                )
                .expect(1)
                .mount(&mock_server)
                .await;

            Mock::given(method("GET"))
                .and(path("/favorites/user-units-projects/u1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(empty_snapshot_json()))
                .expect(1)
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            // two rapid clicks on the same heart icon
            tokio::join!(
                store.add_project_to_favorites(42),
                store.add_project_to_favorites(42),
            );

            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.severity, Severity::Success);
            assert!(
                receiver.try_recv().is_err(),
                "the coalesced duplicate must not notify"
            );

            // the guard released the entity once the first mutation finished
            assert!(store.in_flight.lock().unwrap().is_empty());
        });
    }

    #[test]
    fn clear_zeroes_everything() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "favoriteProjects": [],
                    "favoriteUnits": [{
                        "userId": "u1",
                        "unitId": 9,
                        "nameAr": "شقة ٩",
                        "nameEn": "Apartment 9",
                        "price": 480_000.0,
                        "location": "Jeddah",
                        "mainImageUrl": "https://cdn.example.com/9.jpg"
                    }],
                    "totalProjects": 0,
                    "totalUnits": 1
                })))
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, _receiver) = store_against(&mock_server.uri(), auth);

            store.refresh().await;
            assert!(store.is_unit_favorited(9));
            assert_eq!(store.total_units(), 1);

            store.clear();
            assert!(!store.is_unit_favorited(9));
            assert_eq!(store.total_units(), 0);
            assert_eq!(store.snapshot(), FavoritesSnapshot::default());
        });
    }
}
