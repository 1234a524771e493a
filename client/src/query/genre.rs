//! [`Query`] collection related to catalog [`Genre`]s.

use crate::{infra::gateway::Request, read};
#[cfg(doc)]
use crate::{domain::Genre, Query};

use super::Endpoint;

/// Queries all the [`Genre`]s of the catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct Genres;

impl Endpoint for Genres {
    type Output = read::genre::List;

    fn request(self) -> Request {
        Request::get("/movies/genres/")
    }
}
