//! Session and profile commands.

use client::{
    command::{
        authenticate, AddFavoriteGenres, AddFavoriteMovies, AddWatchedMovies,
        Authenticate, Logout, SaveMovie, SavePreferences,
    },
    domain::{
        genre,
        movie::{self, TmdbId},
        user::{self, profile::Rating, session::State},
        Preferences, Profile,
    },
    query::{CachedProfile, CurrentUser, SessionState, UserProfile, WatchHistory},
    Command as _, Query as _,
};
use secrecy::SecretBox;
use serde_json::{json, Value};

use crate::{define_error, AsError, Client, Error};

use super::{local, mutated, render};

/// Registers a new user, logging in as them if the backend allows.
#[tracing::instrument(skip_all, fields(username = %username))]
pub(super) async fn register(
    client: &Client,
    username: user::Username,
    email: Option<user::Email>,
    password: user::Password,
) -> Result<Value, Error> {
    let session = client
        .execute(Authenticate::Register {
            username,
            email,
            password: SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;
    Ok(json!({
        "authenticated": session.is_some(),
        "user": render(&session.map(|s| s.user))?,
    }))
}

/// Logs in as an existing user.
#[tracing::instrument(skip_all, fields(username = %username))]
pub(super) async fn login(
    client: &Client,
    username: user::Username,
    password: user::Password,
) -> Result<Value, Error> {
    let session = client
        .execute(Authenticate::Login {
            username,
            password: SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;
    Ok(json!({
        "authenticated": session.is_some(),
        "user": render(&session.map(|s| s.user))?,
    }))
}

/// Ends the current session.
pub(super) async fn logout(client: &Client) -> Result<Value, Error> {
    client.execute(Logout).await.map_err(AsError::into_error)?;
    Ok(json!({ "status": "Logged out" }))
}

/// Shows the state of the current session.
pub(super) async fn whoami(client: &Client) -> Result<Value, Error> {
    Ok(match local(client.execute(SessionState).await) {
        State::Anonymous => json!({ "state": "anonymous" }),
        State::Authenticating => json!({ "state": "authenticating" }),
        State::Authenticated(session) => json!({
            "state": "authenticated",
            "user": render(&session.user)?,
        }),
    })
}

/// Shows the [`Profile`] of the current user, as stored by the backend.
pub(super) async fn profile(client: &Client) -> Result<Value, Error> {
    let profile = client
        .execute(UserProfile)
        .await
        .map_err(AsError::into_error)?;
    render(&profile)
}

/// Lists the watch history of the current user.
pub(super) async fn history(client: &Client) -> Result<Value, Error> {
    let history = client
        .execute(WatchHistory)
        .await
        .map_err(AsError::into_error)?;
    render(&history)
}

/// Replaces favorite genres of the current user.
pub(super) async fn favorite_genres(
    client: &Client,
    genres: Vec<genre::Id>,
) -> Result<Value, Error> {
    let profile = current_profile(client).await?;
    let outcome = client
        .execute(AddFavoriteGenres {
            profile: profile.id,
            genres,
        })
        .await
        .map_err(AsError::into_error)?;
    mutated(outcome)
}

/// Replaces favorite movies of the current user.
pub(super) async fn favorite_movies(
    client: &Client,
    tmdb_ids: Vec<TmdbId>,
) -> Result<Value, Error> {
    let profile = current_profile(client).await?;
    let movies = save_all(client, tmdb_ids).await?;
    let outcome = client
        .execute(AddFavoriteMovies {
            profile: profile.id,
            movies,
        })
        .await
        .map_err(AsError::into_error)?;
    mutated(outcome)
}

/// Records watched movies of the current user.
pub(super) async fn watched(
    client: &Client,
    tmdb_ids: Vec<TmdbId>,
    rating: Option<Rating>,
) -> Result<Value, Error> {
    let profile = current_profile(client).await?;
    let movies = save_all(client, tmdb_ids).await?;
    let outcome = client
        .execute(AddWatchedMovies {
            profile: profile.id,
            movies,
            rating,
        })
        .await
        .map_err(AsError::into_error)?;
    mutated(outcome)
}

/// Replaces all the preferences of the current user at once.
///
/// Movies already known from the current [`Profile`] aren't saved again.
pub(super) async fn preferences(
    client: &Client,
    genres: Vec<genre::Id>,
    favorites: Vec<TmdbId>,
    watched: Vec<TmdbId>,
    rating: Option<Rating>,
) -> Result<Value, Error> {
    let profile = current_profile(client).await?;
    let known = profile
        .favorite_movies
        .iter()
        .chain(profile.watch_history.iter().map(|w| &w.movie))
        .map(movie::Reference::from)
        .collect::<Vec<_>>();
    let reference = |tmdb_id: TmdbId| {
        known
            .iter()
            .find(|r| r.tmdb_id == tmdb_id)
            .cloned()
            .unwrap_or_else(|| movie::Reference {
                id: None,
                tmdb_id,
                title: tmdb_id.to_string(),
                poster_path: None,
                genre_ids: vec![],
            })
    };

    let outcome = client
        .execute(SavePreferences {
            profile: profile.id,
            genres,
            favorite_movies: favorites.into_iter().map(reference).collect(),
            watched_movies: watched.into_iter().map(reference).collect(),
            rating,
        })
        .await
        .map_err(AsError::into_error)?;
    mutated(outcome)
}

/// Returns [`Preferences`] of the current user, preferring the summary kept
/// in the session.
///
/// Anonymous user has no [`Preferences`].
pub(super) async fn current_preferences(
    client: &Client,
) -> Result<Preferences, Error> {
    let Some(user) = local(client.execute(CurrentUser).await) else {
        return Ok(Preferences::default());
    };
    if let Some(preferences) = user.preferences {
        return Ok(preferences);
    }
    Ok(Preferences::from(&current_profile(client).await?))
}

/// Returns the [`Profile`] of the current user, preferring the cached one.
async fn current_profile(client: &Client) -> Result<Profile, Error> {
    define_error! {
        enum ProfileError {
            #[code = "NO_PROFILE"]
            #[message = "Current `User` has no `Profile`"]
            Missing,
        }
    }

    if let Some(profile) = local(client.execute(CachedProfile).await) {
        return Ok(profile);
    }
    client
        .execute(UserProfile)
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| ProfileError::Missing.into())
}

/// Saves the movies with the provided [`TmdbId`]s into the backend storage
/// one by one, returning their local IDs.
async fn save_all(
    client: &Client,
    tmdb_ids: Vec<TmdbId>,
) -> Result<Vec<movie::Id>, Error> {
    let mut ids = Vec::with_capacity(tmdb_ids.len());
    for tmdb_id in tmdb_ids {
        let stored = client
            .execute(SaveMovie { tmdb_id })
            .await
            .map_err(AsError::into_error)?;
        ids.push(stored.id);
    }
    Ok(ids)
}

impl AsError for authenticate::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "AUTHENTICATION_IN_PROGRESS"]
                #[message = "Another authentication is in progress"]
                InProgress,
            }
        }

        match self {
            Self::InProgress => Some(Error::InProgress.into()),
            Self::Failure(f) => f.try_as_error(),
            Self::Storage(e) => e.try_as_error(),
        }
    }
}
