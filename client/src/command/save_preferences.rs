//! [`Command`] for saving preferences of a [`Profile`] at once.

use common::operations::Perform;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Genre, Profile};
use crate::{
    domain::{
        genre, movie,
        user::profile::{self, Rating},
    },
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway,
    },
    Client, Failure,
};

use super::{
    AddFavoriteGenres, AddFavoriteMovies, AddWatchedMovies, Command, Mutated,
    SaveMovie,
};

/// [`Command`] for replacing favorite [`Genre`]s, favorite movies and
/// watched movies of a [`Profile`] at once.
///
/// Referenced movies not saved into the backend storage yet are saved
/// first, one by one. The first failed step aborts the rest.
#[derive(Clone, Debug)]
pub struct SavePreferences {
    /// ID of the [`Profile`] to update.
    pub profile: profile::Id,

    /// Catalog IDs of the favorite [`Genre`]s.
    pub genres: Vec<genre::Id>,

    /// Favorite movies.
    pub favorite_movies: Vec<movie::Reference>,

    /// Watched movies.
    pub watched_movies: Vec<movie::Reference>,

    /// [`Rating`] given to every watched movie.
    pub rating: Option<Rating>,
}

impl<Gw, St> Command<SavePreferences> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    /// Outcome of the last performed mutation.
    type Ok = Mutated;
    type Err = Traced<Failure>;

    async fn execute(
        &self,
        cmd: SavePreferences,
    ) -> Result<Self::Ok, Self::Err> {
        let SavePreferences {
            profile,
            genres,
            favorite_movies,
            watched_movies,
            rating,
        } = cmd;

        _ = self
            .execute(AddFavoriteGenres { profile, genres })
            .await
            .map_err(tracerr::wrap!())?;

        let movies = self.save_missing(favorite_movies).await?;
        _ = self
            .execute(AddFavoriteMovies { profile, movies })
            .await
            .map_err(tracerr::wrap!())?;

        let movies = self.save_missing(watched_movies).await?;
        self.execute(AddWatchedMovies {
            profile,
            movies,
            rating,
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<Gw, St> Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    /// Resolves local IDs of the provided [`movie::Reference`]s, saving the
    /// unsaved ones.
    async fn save_missing(
        &self,
        movies: Vec<movie::Reference>,
    ) -> Result<Vec<movie::Id>, Traced<Failure>> {
        let mut ids = Vec::with_capacity(movies.len());
        for m in movies {
            let id = if let Some(id) = m.id {
                id
            } else {
                log::debug!("Saving `{}` (TMDB ID: {})", m.title, m.tmdb_id);
                self.execute(SaveMovie { tmdb_id: m.tmdb_id })
                    .await
                    .map_err(tracerr::wrap!())?
                    .id
            };
            ids.push(id);
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        command::{tests::profile_json, Command as _},
        domain::{
            genre,
            movie::{self, TmdbId},
            user::profile::{self, Rating},
        },
        failure::Kind,
        infra::gateway::mock::Recording,
        query::tests::authenticated,
    };

    use super::SavePreferences;

    fn reference(id: Option<u64>, tmdb_id: u64) -> movie::Reference {
        movie::Reference {
            id: id.map(movie::Id::from),
            tmdb_id: TmdbId::from(tmdb_id),
            title: format!("Movie #{tmdb_id}"),
            poster_path: None,
            genre_ids: vec![],
        }
    }

    fn preferences() -> SavePreferences {
        SavePreferences {
            profile: profile::Id::from(3),
            genres: vec![genre::Id::from(28)],
            favorite_movies: vec![reference(Some(12), 603), reference(None, 27205)],
            watched_movies: vec![reference(None, 348)],
            rating: Some(Rating::from(7)),
        }
    }

    #[tokio::test]
    async fn saves_unsaved_movies_before_referencing() {
        let gateway = Recording::default()
            .ok(json!({"status": "Genre added to favorites"}))
            .ok(json!([profile_json()]))
            .ok(json!({"id": 41, "tmdb_id": 27205, "title": "Inception"}))
            .ok(json!({"status": "Movie added to favorites"}))
            .ok(json!([profile_json()]))
            .ok(json!({"id": 42, "tmdb_id": 348, "title": "Alien"}))
            .ok(json!({"status": "Movie added to watch history"}))
            .ok(json!([profile_json()]));
        let client = authenticated(gateway.clone()).await;

        let mutated = client.execute(preferences()).await.unwrap();

        assert_eq!(mutated.status.status, "Movie added to watch history");
        assert_eq!(
            gateway.calls(),
            [
                "POST /db/profiles/3/add_favorite_genre/",
                "GET /db/profiles/",
                "POST /db/movies/save_movie/",
                "POST /db/profiles/3/add_favorite_movie/",
                "GET /db/profiles/",
                "POST /db/movies/save_movie/",
                "POST /db/profiles/3/add_watched_movie/",
                "GET /db/profiles/",
            ],
        );
        let requests = gateway.requests();
        assert_eq!(requests[2].body, Some(json!({"tmdb_id": 27205})));
        assert_eq!(requests[3].body, Some(json!({"movie_id": [12, 41]})));
        assert_eq!(
            requests[6].body,
            Some(json!({"movie_id": [42], "user_rating": 7})),
        );
    }

    #[tokio::test]
    async fn aborts_on_first_failure() {
        let gateway = Recording::default()
            .ok(json!({"status": "Genre added to favorites"}))
            .ok(json!([profile_json()]))
            .status(400, json!({"error": "tmdb_id is required"}));
        let client = authenticated(gateway.clone()).await;

        let err = client.execute(preferences()).await.unwrap_err();

        assert_eq!(err.as_ref().kind, Kind::BadRequest);
        assert_eq!(gateway.calls().len(), 3);
    }
}
