//! UI-facing accessor layer over the favorites and interests stores.
//!
//! Exposes store state and operations unchanged, and drives the one
//! automatic invocation in the module: the auth-transition refresh/clear.
//! Everything else is an explicit user-driven mutation.

use log::info;

use crate::auth::Auth;
use crate::favorites::FavoritesStore;
use crate::interests::InterestsStore;

/// Consumer bindings handed to presentation code
#[derive(Clone)]
pub struct FavoritesBindings {
    auth: Auth,
    favorites: FavoritesStore,
    interests: InterestsStore,
}

impl FavoritesBindings {
    /// Create bindings over a pair of stores
    pub fn new(auth: Auth, favorites: FavoritesStore, interests: InterestsStore) -> Self {
        Self {
            auth,
            favorites,
            interests,
        }
    }

    /// The favorites store, for dispatching mutations and reading state
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// The interests store
    pub fn interests(&self) -> &InterestsStore {
        &self.interests
    }

    /// Re-derived per call against the store snapshot; callers must not
    /// cache the result
    pub fn is_project_favorited(&self, project_id: u64) -> bool {
        self.favorites.is_project_favorited(project_id)
    }

    pub fn is_unit_favorited(&self, unit_id: u64) -> bool {
        self.favorites.is_unit_favorited(unit_id)
    }

    /// Follow authentication transitions: populate both stores on sign-in,
    /// clear both synchronously on sign-out, exactly once per transition.
    ///
    /// Runs until the auth handle is dropped; spawn it on the host runtime:
    ///
    /// ```no_run
    /// # use aqar_client::Aqar;
    /// # async fn wire(aqar: &Aqar) {
    /// let bindings = aqar.bindings();
    /// tokio::spawn(async move { bindings.watch_auth().await });
    /// # }
    /// ```
    pub async fn watch_auth(&self) {
        let mut changes = self.auth.subscribe();
        let mut was_authenticated = *changes.borrow();

        while changes.changed().await.is_ok() {
            let now_authenticated = *changes.borrow_and_update();
            if now_authenticated == was_authenticated {
                continue;
            }
            was_authenticated = now_authenticated;

            if now_authenticated {
                info!("session authenticated, loading favorites and interests");
                self.favorites.refresh().await;
                self.interests.refresh().await;
            } else {
                info!("session ended, clearing favorites and interests");
                self.favorites.clear();
                self.interests.clear();
            }
        }
    }
}
