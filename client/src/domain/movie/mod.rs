//! [`Movie`] definitions.

pub mod credits;
mod image;

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::domain::{genre, Genre};

pub use self::{
    credits::Credits,
    image::{ImagePath, ImageSize, BASE_URL as IMAGE_BASE_URL},
};

/// Movie entry of the catalog.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Movie {
    /// ID of this [`Movie`] in the catalog.
    pub id: TmdbId,

    /// Title of this [`Movie`].
    pub title: String,

    /// Plot overview of this [`Movie`].
    #[serde(default)]
    pub overview: Option<String>,

    /// [`ImagePath`] of the poster of this [`Movie`].
    #[serde(default)]
    pub poster_path: Option<ImagePath>,

    /// [`ImagePath`] of the backdrop of this [`Movie`].
    #[serde(default)]
    pub backdrop_path: Option<ImagePath>,

    /// Release date of this [`Movie`], as `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: Option<String>,

    /// Average vote of this [`Movie`].
    #[serde(default)]
    pub vote_average: Option<f64>,

    /// Number of votes for this [`Movie`].
    #[serde(default)]
    pub vote_count: Option<u64>,

    /// IDs of the [`Genre`]s of this [`Movie`].
    #[serde(default)]
    pub genre_ids: Vec<genre::Id>,
}

impl Movie {
    /// Returns the release year of this [`Movie`], if known.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Indicates whether this [`Movie`] belongs to any of the provided
    /// [`Genre`]s.
    #[must_use]
    pub fn has_any_genre(&self, genres: &[genre::Id]) -> bool {
        self.genre_ids.iter().any(|id| genres.contains(id))
    }
}

/// ID of a [`Movie`] in the catalog.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct TmdbId(u64);

/// ID of a [`Stored`] movie in the backend storage.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct Id(u64);

/// Detailed information about a [`Movie`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Details {
    /// Catalog entry of the [`Movie`].
    #[serde(flatten)]
    pub movie: Movie,

    /// [`Genre`]s of the [`Movie`].
    #[serde(default)]
    pub genres: Vec<Genre>,

    /// Runtime of the [`Movie`] in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,

    /// Tagline of the [`Movie`].
    #[serde(default)]
    pub tagline: Option<String>,

    /// Release status of the [`Movie`].
    #[serde(default)]
    pub status: Option<String>,

    /// Budget of the [`Movie`] in US dollars.
    #[serde(default)]
    pub budget: Option<u64>,

    /// Revenue of the [`Movie`] in US dollars.
    #[serde(default)]
    pub revenue: Option<u64>,
}

impl From<Details> for Movie {
    fn from(details: Details) -> Self {
        let Details {
            mut movie, genres, ..
        } = details;
        if movie.genre_ids.is_empty() {
            movie.genre_ids = genres.into_iter().map(|g| g.id).collect();
        }
        movie
    }
}

/// [`Movie`] saved into the backend storage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Stored {
    /// ID of this [`Stored`] movie in the backend storage.
    pub id: Id,

    /// ID of this movie in the catalog.
    pub tmdb_id: TmdbId,

    /// Title of this movie.
    pub title: String,

    /// Plot overview of this movie.
    #[serde(default)]
    pub overview: Option<String>,

    /// [`ImagePath`] of the poster of this movie.
    #[serde(default)]
    pub poster_path: Option<ImagePath>,

    /// [`ImagePath`] of the backdrop of this movie.
    #[serde(default)]
    pub backdrop_path: Option<ImagePath>,

    /// Release date of this movie, as `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: Option<String>,

    /// Average vote of this movie.
    #[serde(default)]
    pub vote_average: Option<f64>,

    /// Number of votes for this movie.
    #[serde(default)]
    pub vote_count: Option<u64>,

    /// [`genre::Stored`] genres of this movie.
    #[serde(default)]
    pub genres: Vec<genre::Stored>,
}

impl From<&Stored> for Movie {
    fn from(stored: &Stored) -> Self {
        Self {
            id: stored.tmdb_id,
            title: stored.title.clone(),
            overview: stored.overview.clone(),
            poster_path: stored.poster_path.clone(),
            backdrop_path: stored.backdrop_path.clone(),
            release_date: stored.release_date.clone(),
            vote_average: stored.vote_average,
            vote_count: stored.vote_count,
            genre_ids: stored.genres.iter().map(|g| g.tmdb_id).collect(),
        }
    }
}

/// Reference to a movie picked by a user, which may be not saved into the
/// backend storage yet.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Reference {
    /// ID of the [`Stored`] movie, if it's saved already.
    #[serde(default)]
    pub id: Option<Id>,

    /// ID of the movie in the catalog.
    pub tmdb_id: TmdbId,

    /// Title of the movie.
    pub title: String,

    /// [`ImagePath`] of the poster of the movie.
    #[serde(default)]
    pub poster_path: Option<ImagePath>,

    /// IDs of the [`Genre`]s of the movie.
    #[serde(default)]
    pub genre_ids: Vec<genre::Id>,
}

impl From<&Movie> for Reference {
    fn from(movie: &Movie) -> Self {
        Self {
            id: None,
            tmdb_id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            genre_ids: movie.genre_ids.clone(),
        }
    }
}

impl From<&Stored> for Reference {
    fn from(stored: &Stored) -> Self {
        Self {
            id: Some(stored.id),
            tmdb_id: stored.tmdb_id,
            title: stored.title.clone(),
            poster_path: stored.poster_path.clone(),
            genre_ids: stored.genres.iter().map(|g| g.tmdb_id).collect(),
        }
    }
}

/// Title of a movie, as entered by a user.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`] if the given `title` is not blank.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        (!title.trim().is_empty()).then_some(Self(title))
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank `Title`")
    }
}
