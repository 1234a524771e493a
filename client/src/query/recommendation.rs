//! [`Query`] collection of movie recommendations.

use std::convert::Infallible;

use serde_json::json;

use crate::{
    domain::{Movie, Preferences},
    infra::gateway::Request,
    read, Client,
};
#[cfg(doc)]
use crate::Config;

use super::{Endpoint, Query};

/// Queries [`Movie`]s recommended for the provided [`Preferences`].
///
/// Scoring happens on the backend entirely.
#[derive(Clone, Debug)]
pub struct Recommendations {
    /// [`Preferences`] to recommend [`Movie`]s for.
    pub preferences: Preferences,
}

impl Endpoint for Recommendations {
    type Output = read::movie::List;

    fn request(self) -> Request {
        Request::post("/recommendations/").body(json!(self.preferences))
    }
}

/// Picks [`Movie`]s sharing a genre with the favorite ones, without any
/// remote call.
///
/// The input order is kept and the output is limited by
/// [`Config::for_you_limit`].
#[derive(Clone, Debug)]
pub struct ForYou {
    /// [`Movie`]s to pick from.
    pub movies: Vec<Movie>,

    /// [`Preferences`] to pick [`Movie`]s for.
    pub preferences: Preferences,
}

impl<Gw, St> Query<ForYou> for Client<Gw, St> {
    type Ok = Vec<Movie>;
    type Err = Infallible;

    async fn execute(&self, query: ForYou) -> Result<Self::Ok, Self::Err> {
        let ForYou {
            movies,
            preferences,
        } = query;

        Ok(movies
            .into_iter()
            .filter(|m| m.has_any_genre(&preferences.favorite_genres))
            .take(self.config().for_you_limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        domain::{genre, movie::TmdbId, Movie, Preferences},
        infra::{gateway::mock::Recording, Memory},
        query::{tests::client, Query as _},
        Client, Config,
    };

    use super::{ForYou, Recommendations};

    fn movie(id: u64, genres: &[u64]) -> Movie {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Movie #{id}"),
            "genre_ids": genres,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn posts_preferences_in_camel_case() {
        let gateway = Recording::default().ok(json!({"results": []}));
        let client = client(gateway.clone());

        _ = client
            .execute(Recommendations {
                preferences: Preferences {
                    favorite_genres: vec![genre::Id::from(28)],
                    favorite_movies: vec![movie(603, &[28, 878])],
                    watched_movies: vec![],
                },
            })
            .await
            .unwrap();

        let req = &gateway.requests()[0];
        assert_eq!(req.path, "/recommendations/");
        let body = req.body.as_ref().unwrap();
        assert_eq!(body["favoriteGenres"], json!([28]));
        assert_eq!(body["favoriteMovies"][0]["id"], json!(603));
        assert_eq!(body["watchedMovies"], json!([]));
    }

    #[tokio::test]
    async fn picks_movies_sharing_genres() {
        let client = client(Recording::default());

        let picked = client
            .execute(ForYou {
                movies: vec![
                    movie(1, &[18]),
                    movie(2, &[28, 12]),
                    movie(3, &[35]),
                    movie(4, &[12]),
                ],
                preferences: Preferences {
                    favorite_genres: vec![genre::Id::from(12)],
                    ..Preferences::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(
            picked.iter().map(|m| m.id).collect::<Vec<_>>(),
            [TmdbId::from(2), TmdbId::from(4)],
        );
    }

    #[tokio::test]
    async fn limits_picked_movies() {
        let client = Client::new(
            Config { for_you_limit: 2 },
            Recording::default(),
            Memory::default(),
        );

        let picked = client
            .execute(ForYou {
                movies: (1..=5).map(|id| movie(id, &[12])).collect(),
                preferences: Preferences {
                    favorite_genres: vec![genre::Id::from(12)],
                    ..Preferences::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0].id, TmdbId::from(1));
    }

    #[tokio::test]
    async fn picks_nothing_without_favorite_genres() {
        let client = client(Recording::default());

        let picked = client
            .execute(ForYou {
                movies: vec![movie(1, &[12])],
                preferences: Preferences::default(),
            })
            .await
            .unwrap();

        assert!(picked.is_empty());
    }
}
