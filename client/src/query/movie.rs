//! [`Query`] collection related to catalog [`Movie`]s.

use crate::{
    domain::movie::{self, TmdbId},
    infra::gateway::Request,
    read,
};
#[cfg(doc)]
use crate::{domain::Movie, Query};

use super::Endpoint;

/// Queries the currently popular [`Movie`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct PopularMovies;

impl Endpoint for PopularMovies {
    type Output = read::movie::List;

    fn request(self) -> Request {
        Request::get("/movies/popular/")
    }
}

/// Queries [`Movie`]s matching the provided text.
#[derive(Clone, Debug)]
pub struct SearchMovies {
    /// Text to search for.
    pub query: String,
}

impl Endpoint for SearchMovies {
    type Output = read::movie::List;

    fn request(self) -> Request {
        Request::get("/movies/search/").query("query", self.query)
    }
}

/// Queries [`movie::Details`] of a [`Movie`].
#[derive(Clone, Copy, Debug)]
pub struct MovieDetails {
    /// [`TmdbId`] of the [`Movie`].
    pub id: TmdbId,
}

impl Endpoint for MovieDetails {
    type Output = movie::Details;

    fn request(self) -> Request {
        Request::get(format!("/movies/{}/", self.id))
    }
}

/// Queries [`movie::Credits`] of a [`Movie`].
#[derive(Clone, Copy, Debug)]
pub struct MovieCredits {
    /// [`TmdbId`] of the [`Movie`].
    pub id: TmdbId,
}

impl Endpoint for MovieCredits {
    type Output = movie::Credits;

    fn request(self) -> Request {
        Request::get(format!("/movies/{}/credits/", self.id))
    }
}

/// Queries [`Movie`]s similar to the provided one.
#[derive(Clone, Copy, Debug)]
pub struct SimilarMovies {
    /// [`TmdbId`] of the [`Movie`].
    pub id: TmdbId,
}

impl Endpoint for SimilarMovies {
    type Output = read::movie::List;

    fn request(self) -> Request {
        Request::get(format!("/movies/{}/similar/", self.id))
    }
}
