//! [`Command`] for replacing favorite movies of a [`Profile`].

use common::operations::Perform;
use serde_json::json;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{movie::Stored, Profile};
use crate::{
    domain::{movie, user::profile},
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

use super::{Command, Mutated};

/// [`Command`] for replacing favorite movies of a [`Profile`].
#[derive(Clone, Debug)]
pub struct AddFavoriteMovies {
    /// ID of the [`Profile`] to update.
    pub profile: profile::Id,

    /// IDs of the favorite [`Stored`] movies.
    pub movies: Vec<movie::Id>,
}

impl<Gw, St> Command<AddFavoriteMovies> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    type Ok = Mutated;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: AddFavoriteMovies,
    ) -> Result<Self::Ok, Self::Err> {
        let write = Request::post(format!(
            "/db/profiles/{}/add_favorite_movie/",
            cmd.profile,
        ))
        .body(json!({ "movie_id": cmd.movies }));

        self.mutate_profile(write).await.map_err(tracerr::wrap!())
    }
}
