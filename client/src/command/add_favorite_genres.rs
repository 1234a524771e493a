//! [`Command`] for replacing favorite [`Genre`]s of a [`Profile`].

use common::operations::Perform;
use serde_json::json;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Genre, Profile};
use crate::{
    domain::{genre, user::profile},
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

use super::{Command, Mutated};

/// [`Command`] for replacing favorite [`Genre`]s of a [`Profile`].
#[derive(Clone, Debug)]
pub struct AddFavoriteGenres {
    /// ID of the [`Profile`] to update.
    pub profile: profile::Id,

    /// Catalog IDs of the favorite [`Genre`]s.
    ///
    /// The [`Genre`]s must be synced into the backend storage already.
    pub genres: Vec<genre::Id>,
}

impl<Gw, St> Command<AddFavoriteGenres> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    type Ok = Mutated;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: AddFavoriteGenres,
    ) -> Result<Self::Ok, Self::Err> {
        let write = Request::post(format!(
            "/db/profiles/{}/add_favorite_genre/",
            cmd.profile,
        ))
        .body(json!({ "genre_id": cmd.genres }));

        self.mutate_profile(write).await.map_err(tracerr::wrap!())
    }
}
