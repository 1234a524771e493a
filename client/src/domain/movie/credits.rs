//! [`Credits`] definitions.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use super::ImagePath;

/// Cast and crew of a movie.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Credits {
    /// Cast of the movie.
    #[serde(default)]
    pub cast: Vec<CastMember>,

    /// Crew of the movie.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Returns the [`CrewMember`]s who directed the movie.
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|m| m.job == "Director")
    }
}

/// ID of a person in the catalog.
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
pub struct PersonId(u64);

/// Member of a movie cast.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CastMember {
    /// ID of this [`CastMember`].
    pub id: PersonId,

    /// Name of this [`CastMember`].
    pub name: String,

    /// Character played by this [`CastMember`].
    #[serde(default)]
    pub character: Option<String>,

    /// [`ImagePath`] of this [`CastMember`]'s photo.
    #[serde(default)]
    pub profile_path: Option<ImagePath>,
}

/// Member of a movie crew.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CrewMember {
    /// ID of this [`CrewMember`].
    pub id: PersonId,

    /// Name of this [`CrewMember`].
    pub name: String,

    /// Job of this [`CrewMember`].
    pub job: String,

    /// [`ImagePath`] of this [`CrewMember`]'s photo.
    #[serde(default)]
    pub profile_path: Option<ImagePath>,
}
