//! [`Command`] for generating trivia about a saved movie.

use serde_json::json;

#[cfg(doc)]
use crate::{domain::movie::Stored, Command};
use crate::{
    domain::{ai, movie},
    infra::gateway::Request,
    query::Endpoint,
};

/// [`Command`] for generating trivia about a [`Stored`] movie and saving it
/// into the backend storage.
#[derive(Clone, Copy, Debug)]
pub struct GenerateTrivia {
    /// ID of the [`Stored`] movie.
    pub movie: movie::Id,
}

impl Endpoint for GenerateTrivia {
    type Output = Vec<ai::StoredQuestion>;

    fn request(self) -> Request {
        Request::post("/db/movie-trivia/generate_and_save/")
            .body(json!({ "movie_id": self.movie }))
    }
}
