//! Catalog browsing and recommendation commands.

use client::{
    command::{SaveMovie, SyncGenres},
    domain::movie::{ImageSize, TmdbId},
    query::{
        ForYou, Genres, MovieCredits, MovieDetails, PopularMovies,
        Recommendations, SearchMovies, SimilarMovies,
    },
    Command as _, Query as _,
};
use futures::future;
use serde_json::{json, Value};

use crate::{AsError, Client, Error};

use super::{account, local, render};

/// Lists currently popular movies.
pub(super) async fn popular(client: &Client) -> Result<Value, Error> {
    let list = client
        .execute(PopularMovies)
        .await
        .map_err(AsError::into_error)?;
    render(&list)
}

/// Searches movies by the provided `query`.
#[tracing::instrument(skip_all, fields(query = %query))]
pub(super) async fn search(
    client: &Client,
    query: String,
) -> Result<Value, Error> {
    let list = client
        .execute(SearchMovies { query })
        .await
        .map_err(AsError::into_error)?;
    render(&list)
}

/// Shows details, credits and similar movies of the movie with the provided
/// [`TmdbId`] at once.
#[tracing::instrument(skip_all, fields(id = %id))]
pub(super) async fn movie(client: &Client, id: TmdbId) -> Result<Value, Error> {
    let (details, credits, similar) = future::try_join3(
        client.execute(MovieDetails { id }),
        client.execute(MovieCredits { id }),
        client.execute(SimilarMovies { id }),
    )
    .await
    .map_err(AsError::into_error)?;

    let poster = details
        .movie
        .poster_path
        .as_ref()
        .and_then(|p| p.url(ImageSize::default()));
    let directors = credits
        .directors()
        .map(|d| d.name.clone())
        .collect::<Vec<_>>();

    Ok(json!({
        "details": render(&details)?,
        "poster": poster,
        "directors": directors,
        "credits": render(&credits)?,
        "similar": render(&similar.results)?,
    }))
}

/// Lists catalog genres.
pub(super) async fn genres(client: &Client) -> Result<Value, Error> {
    let list = client
        .execute(Genres)
        .await
        .map_err(AsError::into_error)?;
    render(&list)
}

/// Syncs catalog genres into the backend storage.
pub(super) async fn sync_genres(client: &Client) -> Result<Value, Error> {
    let status = client
        .execute(SyncGenres)
        .await
        .map_err(AsError::into_error)?;
    render(&status)
}

/// Saves the movie with the provided [`TmdbId`] into the backend storage.
#[tracing::instrument(skip_all, fields(tmdb_id = %tmdb_id))]
pub(super) async fn save_movie(
    client: &Client,
    tmdb_id: TmdbId,
) -> Result<Value, Error> {
    let stored = client
        .execute(SaveMovie { tmdb_id })
        .await
        .map_err(AsError::into_error)?;
    render(&stored)
}

/// Recommends movies for the preferences of the current user.
pub(super) async fn recommend(client: &Client) -> Result<Value, Error> {
    let preferences = account::current_preferences(client).await?;
    let list = client
        .execute(Recommendations { preferences })
        .await
        .map_err(AsError::into_error)?;
    render(&list)
}

/// Picks popular movies of the favorite genres of the current user.
pub(super) async fn for_you(client: &Client) -> Result<Value, Error> {
    let preferences = account::current_preferences(client).await?;
    let popular = client
        .execute(PopularMovies)
        .await
        .map_err(AsError::into_error)?;
    let movies = local(
        client
            .execute(ForYou {
                movies: popular.results,
                preferences,
            })
            .await,
    );
    render(&movies)
}
