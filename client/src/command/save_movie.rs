//! [`Command`] for saving a catalog movie into the backend storage.

use serde_json::json;

#[cfg(doc)]
use crate::{domain::Movie, Command};
use crate::{
    domain::movie::{self, TmdbId},
    infra::gateway::Request,
    query::Endpoint,
};

/// [`Command`] for saving a catalog [`Movie`] into the backend storage.
///
/// Saving an already saved [`Movie`] updates it and returns the same
/// [`movie::Id`].
#[derive(Clone, Copy, Debug)]
pub struct SaveMovie {
    /// [`TmdbId`] of the [`Movie`] to save.
    pub tmdb_id: TmdbId,
}

impl Endpoint for SaveMovie {
    type Output = movie::Stored;

    fn request(self) -> Request {
        Request::post("/db/movies/save_movie/")
            .body(json!({ "tmdb_id": self.tmdb_id }))
    }
}
