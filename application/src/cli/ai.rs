//! AI-assisted commands.

use client::{
    command::{GenerateTrivia, SaveMovie},
    domain::{
        ai::PlotDescription,
        movie::{self, TmdbId},
    },
    query::{GuessMovie, MovieTrivia},
    Command as _, Query as _,
};
use serde_json::Value;

use crate::{define_error, AsError, Client, Error};

use super::render;

/// Guesses a movie by the provided `plot` description.
pub(super) async fn guess(client: &Client, plot: String) -> Result<Value, Error> {
    define_error! {
        enum PlotError {
            #[code = "PLOT_TOO_SHORT"]
            #[message = "Plot description must be at least 10 characters \
                         long"]
            TooShort,
        }
    }

    let plot = PlotDescription::new(plot)
        .ok_or_else(|| Error::from(PlotError::TooShort))?;
    let guess = client
        .execute(GuessMovie { plot })
        .await
        .map_err(AsError::into_error)?;
    render(&guess)
}

/// Generates trivia questions about the movie with the provided `title`.
#[tracing::instrument(skip_all, fields(title = %title))]
pub(super) async fn trivia(
    client: &Client,
    title: movie::Title,
) -> Result<Value, Error> {
    let trivia = client
        .execute(MovieTrivia { title })
        .await
        .map_err(AsError::into_error)?;
    render(&trivia)
}

/// Generates trivia questions about the movie with the provided [`TmdbId`],
/// saving both the movie and the questions into the backend storage.
#[tracing::instrument(skip_all, fields(tmdb_id = %tmdb_id))]
pub(super) async fn generate_trivia(
    client: &Client,
    tmdb_id: TmdbId,
) -> Result<Value, Error> {
    let stored = client
        .execute(SaveMovie { tmdb_id })
        .await
        .map_err(AsError::into_error)?;
    let questions = client
        .execute(GenerateTrivia { movie: stored.id })
        .await
        .map_err(AsError::into_error)?;
    render(&questions)
}
