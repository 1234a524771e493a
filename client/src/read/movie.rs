//! [`Movie`] read model definition.

use serde::{Deserialize, Serialize};

use crate::domain::Movie;

/// List of catalog [`Movie`]s.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct List {
    /// [`Movie`]s of this [`List`].
    #[serde(default)]
    pub results: Vec<Movie>,
}

impl IntoIterator for List {
    type Item = Movie;
    type IntoIter = std::vec::IntoIter<Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
