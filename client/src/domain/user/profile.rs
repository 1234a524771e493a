//! [`Profile`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{genre, movie};

use super::Username;

/// Server-owned profile of a [`User`] holding their movie preferences.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// [`Username`] of the [`User`] owning this [`Profile`].
    pub user: Username,

    /// Favorite genres of the [`User`].
    #[serde(default)]
    pub favorite_genres: Vec<genre::Stored>,

    /// Favorite movies of the [`User`].
    #[serde(default)]
    pub favorite_movies: Vec<movie::Stored>,

    /// Movies watched by the [`User`].
    #[serde(default)]
    pub watch_history: Vec<Watched>,
}

impl Profile {
    /// Returns the catalog IDs of the favorite genres.
    #[must_use]
    pub fn favorite_genre_ids(&self) -> Vec<genre::Id> {
        self.favorite_genres.iter().map(|g| g.tmdb_id).collect()
    }
}

/// ID of a [`Profile`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// Entry of a watch history.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Watched {
    /// ID of this [`Watched`] entry.
    pub id: WatchedId,

    /// Watched movie.
    pub movie: movie::Stored,

    /// [`DateTimeOf`] when the movie was watched.
    ///
    /// Unparsable values are treated as unknown.
    #[serde(default, with = "common::datetime::serde::rfc3339::lenient")]
    pub watched_date: Option<WatchedDateTime>,

    /// [`Rating`] given to the movie.
    #[serde(default)]
    pub user_rating: Option<Rating>,
}

/// ID of a [`Watched`] entry.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct WatchedId(u64);

/// Rating given by a [`User`] to a watched movie.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Rating(i32);

/// [`DateTimeOf`] when a movie was watched.
pub type WatchedDateTime = DateTimeOf<(Watched, unit::Watching)>;
