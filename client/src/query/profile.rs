//! [`Query`] collection related to the [`Profile`] of the current user.

use std::convert::Infallible;

use common::operations::Perform;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user::profile, Profile},
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

use super::{Endpoint, Query};

/// Queries the [`Profile`] of the current user from the backend, caching
/// it in the session.
///
/// [`None`] is returned if the backend lists no [`Profile`]. The [`Profile`]
/// is not cached if the session has ended or changed in the meantime.
#[derive(Clone, Copy, Debug, Default)]
pub struct UserProfile;

impl<Gw, St> Query<UserProfile> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    type Ok = Option<Profile>;
    type Err = Traced<Failure>;

    async fn execute(&self, _: UserProfile) -> Result<Self::Ok, Self::Err> {
        let owner = self.session_store().token().await;
        let profile = self
            .fetch::<Vec<Profile>>(Request::get("/db/profiles/"))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .next();

        if let (Some(p), Some(owner)) = (&profile, &owner) {
            match self.session_store().save_profile(owner, p).await {
                Ok(true) => {}
                Ok(false) => log::debug!("Session changed, `Profile` not cached"),
                Err(e) => log::warn!("Failed to cache `Profile`: {e}"),
            }
        }
        Ok(profile)
    }
}

/// Queries the [`Profile`] cached in the session, without any remote call.
#[derive(Clone, Copy, Debug, Default)]
pub struct CachedProfile;

impl<Gw, St> Query<CachedProfile> for Client<Gw, St>
where
    St: storage::Backend,
{
    type Ok = Option<Profile>;
    type Err = Infallible;

    async fn execute(&self, _: CachedProfile) -> Result<Self::Ok, Self::Err> {
        Ok(self.session_store().current_profile().await)
    }
}

/// Queries the watch history of the current user.
#[derive(Clone, Copy, Debug, Default)]
pub struct WatchHistory;

impl Endpoint for WatchHistory {
    type Output = Vec<profile::Watched>;

    fn request(self) -> Request {
        Request::get("/db/watch-history/")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        command::{Command as _, Logout},
        domain::{
            user::{self, profile, Session, Token},
            Preferences, User,
        },
        failure::Kind,
        infra::gateway::mock::Recording,
        query::{
            tests::{authenticated, client},
            CurrentUser, Query as _,
        },
    };

    use super::{CachedProfile, UserProfile, WatchHistory};

    fn profile_json() -> serde_json::Value {
        json!({
            "id": 3,
            "user": "neo",
            "favorite_genres": [],
            "favorite_movies": [],
            "watch_history": [],
        })
    }

    #[tokio::test]
    async fn caches_first_listed_profile() {
        let gateway = Recording::default().ok(json!([profile_json()]));
        let client = authenticated(gateway.clone()).await;

        let profile = client.execute(UserProfile).await.unwrap().unwrap();

        assert_eq!(profile.id, profile::Id::from(3));
        let req = &gateway.requests()[0];
        assert_eq!(req.path, "/db/profiles/");
        assert_eq!(req.token, Token::new("abc123"));
        assert_eq!(
            client.execute(CachedProfile).await.unwrap(),
            Some(profile.clone()),
        );
        let user = client.execute(CurrentUser).await.unwrap().unwrap();
        assert_eq!(user.preferences, Some(Preferences::from(&profile)));
    }

    #[tokio::test]
    async fn logout_during_refresh_discards_profile() {
        let (gateway, gate) = Recording::gated();
        let gateway = gateway.ok(json!([profile_json()]));
        let client = authenticated(gateway).await;

        let (profile, ()) = tokio::join!(client.execute(UserProfile), async {
            client.execute(Logout).await.unwrap();
            gate.notify_one();
        });

        assert!(profile.unwrap().is_some());
        assert_eq!(client.execute(CachedProfile).await.unwrap(), None);
        assert_eq!(client.session_store().current().await, None);
    }

    #[tokio::test]
    async fn new_login_during_refresh_discards_profile() {
        let (gateway, gate) = Recording::gated();
        let gateway = gateway.ok(json!([profile_json()]));
        let client = authenticated(gateway).await;
        let next = Session {
            user: User {
                id: user::Id::from(2),
                username: user::Username::new("trinity").unwrap(),
                preferences: None,
            },
            token: Token::new("def456").unwrap(),
        };

        let (profile, ()) = tokio::join!(client.execute(UserProfile), async {
            client.session_store().save(&next).await.unwrap();
            gate.notify_one();
        });

        assert!(profile.unwrap().is_some());
        assert_eq!(client.execute(CachedProfile).await.unwrap(), None);
        assert_eq!(client.session_store().current().await, Some(next));
    }

    #[tokio::test]
    async fn empty_list_means_no_profile() {
        let gateway = Recording::default().ok(json!([]));
        let client = authenticated(gateway).await;

        assert_eq!(client.execute(UserProfile).await.unwrap(), None);
        assert_eq!(client.execute(CachedProfile).await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let gateway = Recording::default()
            .status(401, json!({"detail": "Invalid token."}));
        let client = authenticated(gateway).await;

        let err = client.execute(UserProfile).await.unwrap_err();

        assert!(err.as_ref().is_unauthorized());
        assert_eq!(err.as_ref().kind, Kind::Unauthorized);
        assert_eq!(err.as_ref().message.as_deref(), Some("Invalid token."));
    }

    #[tokio::test]
    async fn lists_watch_history() {
        let gateway = Recording::default().ok(json!([{
            "id": 9,
            "movie": {"id": 12, "tmdb_id": 603, "title": "The Matrix"},
            "watched_date": "2024-03-01T10:20:30Z",
            "user_rating": 8,
        }]));
        let client = client(gateway.clone());

        let history = client.execute(WatchHistory).await.unwrap();

        assert_eq!(gateway.calls(), ["GET /db/watch-history/"]);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].movie.title, "The Matrix");
    }
}
