//! [`Command`] definition.

pub mod add_favorite_genres;
pub mod add_favorite_movies;
pub mod add_watched_movies;
pub mod authenticate;
pub mod generate_trivia;
pub mod logout;
pub mod save_movie;
pub mod save_preferences;
pub mod sync_genres;

use common::operations::Perform;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Profile,
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    query::UserProfile,
    read, Client, Failure,
};

/// [`Command`] of the [`Client`].
pub use common::Handler as Command;

pub use self::{
    add_favorite_genres::AddFavoriteGenres,
    add_favorite_movies::AddFavoriteMovies,
    add_watched_movies::AddWatchedMovies, authenticate::Authenticate,
    generate_trivia::GenerateTrivia, logout::Logout, save_movie::SaveMovie,
    save_preferences::SavePreferences, sync_genres::SyncGenres,
};

/// Outcome of a [`Profile`] mutation.
#[derive(Debug)]
pub struct Mutated {
    /// Acknowledgement of the performed write.
    pub status: read::Status,

    /// Outcome of re-reading the [`Profile`] after the write.
    ///
    /// Its failure doesn't undo the write, so may be ignored.
    pub refresh: Result<Option<Profile>, Traced<Failure>>,
}

impl<Gw, St> Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    /// Performs the provided [`Profile`] write, and re-reads the [`Profile`]
    /// once it succeeds.
    async fn mutate_profile(
        &self,
        write: Request,
    ) -> Result<Mutated, Traced<Failure>> {
        let status = self
            .fetch::<read::Status>(write)
            .await
            .map_err(tracerr::wrap!())?;

        let refresh = self.execute(UserProfile).await;
        if let Err(e) = &refresh {
            log::warn!("Failed to refresh `Profile` after `{status:?}`: {e}");
        }
        Ok(Mutated { status, refresh })
    }
}
