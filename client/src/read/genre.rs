//! [`Genre`] read model definition.

use serde::{Deserialize, Serialize};

use crate::domain::Genre;

/// List of catalog [`Genre`]s.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct List {
    /// [`Genre`]s of this [`List`].
    #[serde(default)]
    pub genres: Vec<Genre>,
}
