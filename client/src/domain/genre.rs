//! [`Genre`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// Genre of the movie catalog.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Genre {
    /// ID of this [`Genre`] in the catalog.
    pub id: Id,

    /// Name of this [`Genre`].
    pub name: String,
}

/// ID of a [`Genre`] in the catalog.
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

/// [`Genre`] synced into the backend storage.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Stored {
    /// ID of this [`Stored`] genre in the backend storage.
    pub id: StoredId,

    /// ID of this genre in the catalog.
    pub tmdb_id: Id,

    /// Name of this genre.
    pub name: String,
}

/// ID of a [`Stored`] genre.
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
pub struct StoredId(u64);

impl From<Stored> for Genre {
    fn from(stored: Stored) -> Self {
        Self {
            id: stored.tmdb_id,
            name: stored.name,
        }
    }
}
