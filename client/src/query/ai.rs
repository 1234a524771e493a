//! [`Query`] collection of AI-generated content.

use serde_json::json;

use crate::{
    domain::{
        ai::{self, PlotDescription},
        movie,
    },
    infra::gateway::Request,
};
#[cfg(doc)]
use crate::Query;

use super::Endpoint;

/// Queries an [`ai::Guess`] of a movie by its [`PlotDescription`].
///
/// This is a long-running call.
#[derive(Clone, Debug)]
pub struct GuessMovie {
    /// [`PlotDescription`] of the movie to guess.
    pub plot: PlotDescription,
}

impl Endpoint for GuessMovie {
    type Output = ai::Guess;

    fn request(self) -> Request {
        Request::post("/ai/guess-movie/")
            .body(json!({ "plot_description": self.plot }))
    }
}

/// Queries a freshly generated [`ai::Trivia`] about a movie.
///
/// This is a long-running call.
#[derive(Clone, Debug)]
pub struct MovieTrivia {
    /// [`movie::Title`] of the movie.
    pub title: movie::Title,
}

impl Endpoint for MovieTrivia {
    type Output = ai::Trivia;

    fn request(self) -> Request {
        Request::post("/ai/movie-trivia/")
            .body(json!({ "movie_title": self.title }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        domain::{ai::PlotDescription, movie},
        failure::Kind,
        infra::gateway::mock::Recording,
        query::{tests::client, Query as _},
    };

    use super::{GuessMovie, MovieTrivia};

    #[tokio::test]
    async fn posts_plot_description() {
        let gateway = Recording::default().ok(json!({
            "movie_title": "Inception",
            "confidence": 90,
            "explanation": "Dreams within dreams.",
        }));
        let client = client(gateway.clone());

        let guess = client
            .execute(GuessMovie {
                plot: PlotDescription::new("a thief steals secrets through dreams")
                    .unwrap(),
            })
            .await
            .unwrap();

        let req = &gateway.requests()[0];
        assert_eq!(req.path, "/ai/guess-movie/");
        assert_eq!(
            req.body,
            Some(json!({"plot_description": "a thief steals secrets through dreams"})),
        );
        assert_eq!(guess.movie_title, "Inception");
        assert_eq!(guess.confidence, 90);
    }

    #[tokio::test]
    async fn posts_movie_title() {
        let gateway = Recording::default().ok(json!({
            "movie_title": "Alien",
            "questions": [],
        }));
        let client = client(gateway.clone());

        let trivia = client
            .execute(MovieTrivia {
                title: movie::Title::new("Alien").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(
            gateway.requests()[0].body,
            Some(json!({"movie_title": "Alien"})),
        );
        assert_eq!(trivia.movie_title, "Alien");
    }

    #[tokio::test]
    async fn reports_validation_errors() {
        let gateway = Recording::default().status(
            400,
            json!({"plot_description": ["Ensure this field has at least 10 characters."]}),
        );
        let client = client(gateway);

        let err = client
            .execute(GuessMovie {
                plot: PlotDescription::new("0123456789").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.as_ref().kind, Kind::BadRequest);
        assert_eq!(
            err.as_ref().message.as_deref(),
            Some("plot_description: Ensure this field has at least 10 characters."),
        );
    }
}
