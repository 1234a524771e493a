//! [`Query`] definition.

pub mod ai;
pub mod genre;
pub mod movie;
pub mod profile;
pub mod recommendation;
pub mod session;

use common::operations::Perform;
use serde::de::DeserializeOwned;
use tracerr::Traced;

use crate::{
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

/// [`Query`] of the [`Client`].
pub use common::Handler as Query;

pub use self::{
    ai::{GuessMovie, MovieTrivia},
    genre::Genres,
    movie::{MovieCredits, MovieDetails, PopularMovies, SearchMovies, SimilarMovies},
    profile::{CachedProfile, UserProfile, WatchHistory},
    recommendation::{ForYou, Recommendations},
    session::{CurrentUser, SessionState},
};

/// Single remote call of the backend API, answering with a JSON-encoded
/// [`Endpoint::Output`].
///
/// Every [`Endpoint`] is executable by a [`Client`] as is.
pub trait Endpoint {
    /// Type of the decoded response.
    type Output: DeserializeOwned;

    /// Composes the [`Request`] of this [`Endpoint`].
    fn request(self) -> Request;
}

impl<Gw, St, E> Query<E> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
    E: Endpoint,
{
    type Ok = E::Output;
    type Err = Traced<Failure>;

    async fn execute(&self, endpoint: E) -> Result<Self::Ok, Self::Err> {
        self.fetch(endpoint.request())
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{
        domain::{
            user::{self, Session, Token},
            User,
        },
        infra::{gateway::mock::Recording, Memory},
        Client, Config,
    };

    /// Creates a new [`Client`] over the provided [`Recording`] gateway.
    pub(crate) fn client(gateway: Recording) -> Client<Recording, Memory> {
        Client::new(Config::default(), gateway, Memory::default())
    }

    /// Creates a new [`Client`] with an authenticated session.
    pub(crate) async fn authenticated(
        gateway: Recording,
    ) -> Client<Recording, Memory> {
        let client = client(gateway);
        client
            .session_store()
            .save(&Session {
                user: User {
                    id: user::Id::from(1),
                    username: user::Username::new("neo").unwrap(),
                    preferences: None,
                },
                token: Token::new("abc123").unwrap(),
            })
            .await
            .unwrap();
        client
    }
}
