//! In-memory interest-record store, the mirror of the favorites store for
//! lead submissions.
//!
//! Interests and favorites are logically unrelated collections that happen
//! to share a user scope, so this store carries its own loading/error
//! lifecycle, independent of [`crate::favorites::FavoritesStore`].

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
use self::types::InterestedSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Target {
    Project(u64),
    Unit(u64),
}

#[derive(Debug, Default)]
struct State {
    snapshot: InterestedSnapshot,
    is_loading: bool,
    error: Option<String>,
}

struct InFlightGuard {
    set: Arc<Mutex<HashSet<Target>>>,
    target: Target,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.target);
    }
}

/// The interest-record store
#[derive(Clone)]
pub struct InterestsStore {
    gateway: Gateway,
    auth: Auth,
    notifier: Arc<dyn Notifier>,
    language: LanguagePreference,
    state: Arc<RwLock<State>>,
    in_flight: Arc<Mutex<HashSet<Target>>>,
}

impl InterestsStore {
    /// Create a new interests store
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

    /// Replace the snapshot with the server's authoritative interest list.
    ///
    /// Same preserve-on-failure policy as the favorites store.
    pub async fn refresh(&self) {
        let Some(user_id) = self.auth.user_id() else {
            debug!("interests refresh skipped: no signed-in user");
            return;
        };

        self.set_loading(true);
        match self.gateway.user_interests(&user_id).await {
            Ok(snapshot) => {
                info!(
                    "interests refreshed for {}: {} projects, {} units",
                    user_id, snapshot.total_projects, snapshot.total_units
                );
                let mut state = self.state.write().unwrap();
                state.snapshot = snapshot;
                state.error = None;
                state.is_loading = false;
            }
            Err(err) => {
                error!("interests refresh failed for {}: {}", user_id, err);
                self.notify(Severity::Error, Notice::InterestsLoadFailed);
                let mut state = self.state.write().unwrap();
                state.error = Some(err.to_string());
                state.is_loading = false;
            }
        }
    }

    /// Remove the interest record for a project and re-fetch the snapshot
    pub async fn remove_project_from_interested(&self, project_id: u64) {
        let Some(_user_id) = self.require_user("remove project interest") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Project(project_id)) else {
            return;
        };

        self.set_loading(true);
        match self.gateway.remove_project(project_id).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::InterestedProjectRemoved);
            }
            Err(err) => {
                error!("removing project {} interest failed: {}", project_id, err);
                self.notify(Severity::Error, Notice::InterestedProjectRemoveFailed);
                self.set_loading(false);
            }
        }
    }

    /// Remove the interest record for a unit and re-fetch the snapshot
    pub async fn remove_unit_from_interested(&self, unit_id: u64) {
        let Some(_user_id) = self.require_user("remove unit interest") else {
            return;
        };
        let Some(_guard) = self.begin(Target::Unit(unit_id)) else {
            return;
        };

        self.set_loading(true);
        match self.gateway.remove_unit(unit_id).await {
            Ok(()) => {
                self.refresh().await;
                self.notify(Severity::Success, Notice::InterestedUnitRemoved);
            }
            Err(err) => {
                error!("removing unit {} interest failed: {}", unit_id, err);
                self.notify(Severity::Error, Notice::InterestedUnitRemoveFailed);
                self.set_loading(false);
            }
        }
    }

    /// Empty all arrays and zero all counts, synchronously
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.snapshot = InterestedSnapshot::default();
        state.error = None;
        state.is_loading = false;
    }

    /// A copy of the current snapshot
    pub fn snapshot(&self) -> InterestedSnapshot {
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

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    fn set_loading(&self, value: bool) {
        self.state.write().unwrap().is_loading = value;
    }

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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_against(
        server_uri: &str,
        auth: Auth,
    ) -> (InterestsStore, UnboundedReceiver<Notification>) {
        let (notifier, receiver) = ChannelNotifier::new();
        let store = InterestsStore::new(
            server_uri,
            Client::new(),
            auth,
            Arc::new(notifier),
            LanguagePreference::new(Language::English),
        );
        (store, receiver)
    }

    fn snapshot_with_project_interest() -> serde_json::Value {
        serde_json::json!({
            "interestedProjects": [{
                "userId": "u1",
                "projectId": 11,
                "fullName": "Sara Al-Omari",
                "email": "sara@example.com",
                "phone": "+966500000000",
                "preferredContact": "whatsapp",
                "nameAr": "مشروع الواحة",
                "nameEn": "Oasis Project",
                "price": 950_000.0,
                "location": "Dammam",
                "mainImageUrl": null
            }],
            "interestedUnits": [],
            "totalProjects": 1,
            "totalUnits": 0
        })
    }

    #[test]
    fn remove_then_refresh_reflects_server_state() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("DELETE"))
                .and(path("/interests/project"))
                .and(query_param("projectId", "11"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .expect(1)
                .mount(&mock_server)
                .await;

            Mock::given(method("GET"))
                .and(path("/interests/user-units-projects/u1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "interestedProjects": [],
                    "interestedUnits": [],
                    "totalProjects": 0,
                    "totalUnits": 0
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            store.remove_project_from_interested(11).await;

            assert_eq!(store.total_projects(), 0);
            assert!(!store.is_loading());

            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.severity, Severity::Success);
            assert_eq!(notice.message, "Project removed from your interests");
            assert!(receiver.try_recv().is_err());
        });
    }

    #[test]
    fn failed_remove_leaves_snapshot_untouched() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/interests/user-units-projects/u1"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(snapshot_with_project_interest()),
                )
                .expect(1)
                .mount(&mock_server)
                .await;

            Mock::given(method("DELETE"))
                .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                    "message": "boom"
                })))
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            store.refresh().await;
            let before = store.snapshot();
            assert_eq!(before.total_projects, 1);

            store.remove_project_from_interested(11).await;

            assert_eq!(store.snapshot(), before);
            assert!(!store.is_loading());
            let notice = receiver.try_recv().unwrap();
            assert_eq!(notice.severity, Severity::Error);
        });
    }

    #[test]
    fn concurrent_removals_of_one_record_coalesce_to_a_single_request() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("DELETE"))
                .and(path("/interests/unit"))
                .and(query_param("unitId", "8"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({}))
                        .set_delay(std::time::Duration::from_millis(200)),
                )
                .expect(1)
                .mount(&mock_server)
                .await;

            Mock::given(method("GET"))
                .and(path("/interests/user-units-projects/u1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "interestedProjects": [],
                    "interestedUnits": [],
                    "totalProjects": 0,
                    "totalUnits": 0
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let auth = Auth::new();
            auth.set_session(Session::new("u1", "token"));
            let (store, mut receiver) = store_against(&mock_server.uri(), auth);

            tokio::join!(
                store.remove_unit_from_interested(8),
                store.remove_unit_from_interested(8),
            );

            assert_eq!(receiver.try_recv().unwrap().severity, Severity::Success);
            assert!(receiver.try_recv().is_err());
            assert!(store.in_flight.lock().unwrap().is_empty());
        });
    }

    #[test]
    fn preferred_contact_parses_lowercase_wire_values() {
        let record: types::InterestedUnit = serde_json::from_value(serde_json::json!({
            "userId": "u1",
            "unitId": 3,
            "fullName": "Omar H.",
            "email": "omar@example.com",
            "phone": "+966511111111",
            "preferredContact": "email",
            "nameAr": "وحدة ٣",
            "nameEn": "Unit 3",
            "price": 320_000.0,
            "location": "Riyadh",
            "mainImageUrl": "https://cdn.example.com/3.jpg"
        }))
        .unwrap();

        assert_eq!(record.preferred_contact, types::ContactMethod::Email);
    }
}
