//! Definitions of AI-generated content.

use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::movie;

/// Free-form description of a movie plot to guess the movie by.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[serde(transparent)]
pub struct PlotDescription(String);

impl PlotDescription {
    /// Minimal number of meaningful characters in a [`PlotDescription`].
    pub const MIN_LEN: usize = 10;

    /// Creates a new [`PlotDescription`] if the given `plot` is long
    /// enough.
    #[must_use]
    pub fn new(plot: impl Into<String>) -> Option<Self> {
        let plot = plot.into();
        (plot.trim().chars().count() >= Self::MIN_LEN).then_some(Self(plot))
    }
}

/// Guess of a movie by its [`PlotDescription`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Guess {
    /// Title of the guessed movie.
    pub movie_title: String,

    /// Release year of the guessed movie.
    #[serde(default)]
    pub release_year: Option<String>,

    /// Confidence of this [`Guess`] in percents.
    pub confidence: u8,

    /// Reasoning behind this [`Guess`].
    pub explanation: String,

    /// URL of the guessed movie poster.
    #[serde(default)]
    pub movie_image: Option<String>,

    /// Less confident [`AlternativeGuess`]es.
    #[serde(default, deserialize_with = "skip_malformed")]
    pub alternative_guesses: Vec<AlternativeGuess>,
}

/// Alternative to the main [`Guess`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AlternativeGuess {
    /// Title of the movie.
    pub title: String,

    /// Release year of the movie.
    #[serde(default)]
    pub year: Option<String>,

    /// Confidence of this [`AlternativeGuess`] in percents.
    #[serde(default)]
    pub confidence: Option<u8>,
}

/// Set of trivia questions about a movie.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Trivia {
    /// Title of the movie.
    pub movie_title: String,

    /// [`Question`]s about the movie.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Multiple-choice trivia question.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Question {
    /// Text of this [`Question`].
    pub question: String,

    /// Possible answers to this [`Question`].
    pub answers: Vec<String>,

    /// Index of the correct answer in the `answers`.
    pub correct_answer_index: usize,

    /// Explanation of the correct answer.
    pub explanation: String,
}

impl Question {
    /// Returns the correct answer to this [`Question`], if its index is in
    /// range.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers.get(self.correct_answer_index).map(String::as_str)
    }
}

/// [`Question`] saved into the backend storage.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoredQuestion {
    /// ID of this [`StoredQuestion`].
    pub id: QuestionId,

    /// Movie this [`StoredQuestion`] is about.
    pub movie: movie::Stored,

    /// The [`Question`] itself.
    #[serde(flatten)]
    pub entry: Question,
}

/// ID of a [`StoredQuestion`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[serde(transparent)]
pub struct QuestionId(u64);

/// Deserializes a list, skipping the items of unexpected shape.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
