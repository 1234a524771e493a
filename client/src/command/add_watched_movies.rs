//! [`Command`] for recording watched movies of a [`Profile`].

use common::operations::Perform;
use serde_json::json;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{movie::Stored, Profile};
use crate::{
    domain::{
        movie,
        user::profile::{self, Rating},
    },
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

use super::{Command, Mutated};

/// [`Command`] for recording watched movies of a [`Profile`].
#[derive(Clone, Debug)]
pub struct AddWatchedMovies {
    /// ID of the [`Profile`] to update.
    pub profile: profile::Id,

    /// IDs of the watched [`Stored`] movies.
    pub movies: Vec<movie::Id>,

    /// [`Rating`] given to every watched movie.
    pub rating: Option<Rating>,
}

impl<Gw, St> Command<AddWatchedMovies> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    type Ok = Mutated;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: AddWatchedMovies,
    ) -> Result<Self::Ok, Self::Err> {
        let write = Request::post(format!(
            "/db/profiles/{}/add_watched_movie/",
            cmd.profile,
        ))
        .body(json!({
            "movie_id": cmd.movies,
            "user_rating": cmd.rating,
        }));

        self.mutate_profile(write).await.map_err(tracerr::wrap!())
    }
}
