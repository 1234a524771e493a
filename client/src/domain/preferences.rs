//! [`Preferences`] definitions.

use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::{genre, Movie, Profile};

/// Movie preferences of a [`User`], as consumed by recommendations.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Catalog IDs of the favorite genres.
    #[serde(default)]
    pub favorite_genres: Vec<genre::Id>,

    /// Favorite movies.
    #[serde(default)]
    pub favorite_movies: Vec<Movie>,

    /// Already watched movies.
    #[serde(default)]
    pub watched_movies: Vec<Movie>,
}

impl From<&Profile> for Preferences {
    fn from(profile: &Profile) -> Self {
        Self {
            favorite_genres: profile.favorite_genre_ids(),
            favorite_movies: profile
                .favorite_movies
                .iter()
                .map(Movie::from)
                .collect(),
            watched_movies: profile
                .watch_history
                .iter()
                .map(|w| Movie::from(&w.movie))
                .collect(),
        }
    }
}
