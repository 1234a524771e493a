//! [`Command`] for syncing catalog [`Genre`]s into the backend storage.

#[cfg(doc)]
use crate::{domain::Genre, Command};
use crate::{infra::gateway::Request, query::Endpoint, read};

/// [`Command`] for syncing catalog [`Genre`]s into the backend storage.
///
/// Required before [`Genre`]s may be referenced by a profile.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncGenres;

impl Endpoint for SyncGenres {
    type Output = read::Status;

    fn request(self) -> Request {
        Request::post("/db/genres/sync_from_tmdb/")
    }
}
