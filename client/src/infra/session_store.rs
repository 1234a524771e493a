//! [`SessionStore`] definitions.

use std::sync::Arc;

use common::operations::{By, Select, Update};
use derive_more::{Display, Error as StdError, From};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracerr::Traced;
use tracing as log;

use crate::domain::{
    user::{Profile, Session, Token},
    Preferences, User,
};

use super::storage::{self, Batch, Key};

/// Persisted state of the current session.
///
/// Entries are kept as JSON under the stable [`Key`]s. A [`Session`] is
/// only ever written and cleared as a whole, so a token never outlives its
/// user record and vice versa. Unreadable entries are reported as absent.
///
/// Writes are serialized, and clones share the same write guard.
#[derive(Clone, Debug)]
pub struct SessionStore<St> {
    /// [`storage::Storage`] of this [`SessionStore`].
    storage: St,

    /// Guard serializing writes.
    writing: Arc<Mutex<()>>,
}

impl<St> SessionStore<St> {
    /// Creates a new [`SessionStore`] on top of the provided `storage`.
    #[must_use]
    pub fn new(storage: St) -> Self {
        Self {
            storage,
            writing: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the underlying [`storage::Storage`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }
}

impl<St: storage::Backend> SessionStore<St> {
    /// Persists the provided [`Session`], dropping any cached [`Profile`]
    /// of the previous one.
    ///
    /// # Errors
    ///
    /// If the [`Session`] cannot be written.
    pub async fn save(&self, session: &Session) -> Result<(), Traced<Error>> {
        let batch = Batch::default()
            .put(Key::Token, encode(&session.token)?)
            .put(Key::User, encode(&session.user)?)
            .remove(Key::Profile);
        let _guard = self.writing.lock().await;
        self.apply(batch).await
    }

    /// Caches the provided [`Profile`] of the [`User`] owning the provided
    /// [`Token`], along with the [`Preferences`] summary of that [`User`].
    ///
    /// Nothing is written and `false` is returned if the provided [`Token`]
    /// is not the one of the current session anymore.
    ///
    /// # Errors
    ///
    /// If the [`Profile`] cannot be written.
    pub async fn save_profile(
        &self,
        owner: &Token,
        profile: &Profile,
    ) -> Result<bool, Traced<Error>> {
        let _guard = self.writing.lock().await;
        if self.token().await.as_ref() != Some(owner) {
            return Ok(false);
        }

        let mut batch = Batch::default().put(Key::Profile, encode(profile)?);
        if let Some(user) = self.current_user().await {
            let user = User {
                preferences: Some(Preferences::from(profile)),
                ..user
            };
            batch = batch.put(Key::User, encode(&user)?);
        }
        self.apply(batch).await.map(|()| true)
    }

    /// Removes every entry of the current session.
    ///
    /// Clearing an empty [`SessionStore`] is a no-op.
    ///
    /// # Errors
    ///
    /// If the entries cannot be removed.
    pub async fn clear(&self) -> Result<(), Traced<Error>> {
        let batch = Key::ALL
            .into_iter()
            .fold(Batch::default(), Batch::remove);
        let _guard = self.writing.lock().await;
        self.apply(batch).await
    }

    /// Returns the [`Token`] of the current session, if any.
    pub async fn token(&self) -> Option<Token> {
        self.read(Key::Token).await
    }

    /// Returns the cached [`User`] of the current session, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.read(Key::User).await
    }

    /// Returns the cached [`Profile`] of the current [`User`], if any.
    pub async fn current_profile(&self) -> Option<Profile> {
        self.read(Key::Profile).await
    }

    /// Returns the current [`Session`], if both of its parts are present.
    pub async fn current(&self) -> Option<Session> {
        let token = self.token().await?;
        let user = self.current_user().await?;
        Some(Session { user, token })
    }

    /// Applies the provided [`Batch`] to the underlying storage.
    async fn apply(&self, batch: Batch) -> Result<(), Traced<Error>> {
        self.storage
            .execute(Update(batch))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))
    }

    /// Reads and decodes the entry under the provided [`Key`].
    async fn read<T: DeserializeOwned>(&self, key: Key) -> Option<T> {
        let raw = match self.storage.execute(Select(By::new(key))).await {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Failed to read `{}` session entry: {e}", key.as_str());
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|e| {
                log::warn!(
                    "Ignoring malformed `{}` session entry: {e}",
                    key.as_str(),
                );
            })
            .ok()
    }
}

/// Encodes the provided `value` as a JSON entry.
fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, Traced<Error>> {
    serde_json::to_string(value).map_err(tracerr::from_and_wrap!(=> Error))
}

/// [`SessionStore`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`storage::Storage`] error.
    #[display("Session storage operation failed: {_0}")]
    Storage(storage::Error),

    /// Entry cannot be encoded.
    #[display("Failed to encode session entry: {_0}")]
    Encode(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use common::operations::Update;

    use crate::{
        domain::{
            user::{self, Profile, Session, Token},
            Preferences, User,
        },
        infra::storage::{Batch, Key, Memory, Storage as _},
    };

    use super::SessionStore;

    fn session(name: &str, token: &str) -> Session {
        Session {
            user: User {
                id: user::Id::from(7),
                username: user::Username::new(name).unwrap(),
                preferences: None,
            },
            token: Token::new(token).unwrap(),
        }
    }

    fn profile() -> Profile {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "user": "neo",
            "favorite_genres": [],
            "favorite_movies": [],
            "watch_history": [],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn reads_back_saved_session() {
        let store = SessionStore::new(Memory::default());
        let s = session("neo", "abc123");

        store.save(&s).await.unwrap();

        assert_eq!(store.token().await, Some(s.token.clone()));
        assert_eq!(store.current_user().await, Some(s.user.clone()));
        assert_eq!(store.current().await, Some(s));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = SessionStore::new(Memory::default());
        let s = session("neo", "abc123");
        store.save(&s).await.unwrap();
        assert!(store.save_profile(&s.token, &profile()).await.unwrap());

        store.clear().await.unwrap();

        assert_eq!(store.token().await, None);
        assert_eq!(store.current_user().await, None);
        assert_eq!(store.current_profile().await, None);
    }

    #[tokio::test]
    async fn clearing_empty_store_is_noop() {
        let store = SessionStore::new(Memory::default());

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.current().await, None);
    }

    #[tokio::test]
    async fn saving_session_drops_cached_profile() {
        let store = SessionStore::new(Memory::default());
        let s = session("neo", "abc123");
        store.save(&s).await.unwrap();
        assert!(store.save_profile(&s.token, &profile()).await.unwrap());
        assert!(store.current_profile().await.is_some());

        store.save(&session("trinity", "def456")).await.unwrap();

        assert_eq!(store.current_profile().await, None);
        assert_eq!(
            store.current_user().await.map(|u| u.username.to_string()),
            Some("trinity".into()),
        );
    }

    #[tokio::test]
    async fn caching_profile_summarizes_preferences() {
        let store = SessionStore::new(Memory::default());
        let s = session("neo", "abc123");
        store.save(&s).await.unwrap();

        assert!(store.save_profile(&s.token, &profile()).await.unwrap());

        assert_eq!(store.current_profile().await, Some(profile()));
        assert_eq!(
            store.current_user().await.and_then(|u| u.preferences),
            Some(Preferences::from(&profile())),
        );
        assert_eq!(store.token().await, Some(s.token));
    }

    #[tokio::test]
    async fn profile_of_stale_token_is_not_cached() {
        let store = SessionStore::new(Memory::default());
        let stale = Token::new("abc123").unwrap();

        assert!(!store.save_profile(&stale, &profile()).await.unwrap());
        assert_eq!(store.current_profile().await, None);

        store.save(&session("trinity", "def456")).await.unwrap();

        assert!(!store.save_profile(&stale, &profile()).await.unwrap());
        assert_eq!(store.current_profile().await, None);
        assert_eq!(
            store.current_user().await.and_then(|u| u.preferences),
            None,
        );
    }

    #[tokio::test]
    async fn corrupted_entry_reads_as_absent() {
        let store = SessionStore::new(Memory::default());
        store.save(&session("neo", "abc123")).await.unwrap();
        store
            .storage()
            .execute(Update(Batch::default().put(Key::User, "{not json")))
            .await
            .unwrap();

        assert_eq!(store.current_user().await, None);
        assert_eq!(store.current().await, None);
        assert!(store.token().await.is_some());
    }

    #[tokio::test]
    async fn session_requires_both_parts() {
        let store = SessionStore::new(Memory::default());
        store
            .storage()
            .execute(Update(Batch::default().put(Key::Token, "\"abc123\"")))
            .await
            .unwrap();

        assert!(store.token().await.is_some());
        assert_eq!(store.current().await, None);
    }
}
