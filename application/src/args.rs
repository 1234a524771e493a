//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use client::domain::{
    genre,
    movie::{self, TmdbId},
    user::{self, profile::Rating},
};

/// Command-line client of the movie discovery API.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists currently popular movies.
    Popular,

    /// Searches movies by text.
    Search {
        /// Text to search for.
        query: String,
    },

    /// Shows details, credits and similar movies of a movie.
    Movie {
        /// Catalog ID of the movie.
        id: TmdbId,
    },

    /// Lists catalog genres.
    Genres,

    /// Syncs catalog genres into the backend storage.
    SyncGenres,

    /// Saves a catalog movie into the backend storage.
    SaveMovie {
        /// Catalog ID of the movie.
        tmdb_id: TmdbId,
    },

    /// Recommends movies for the preferences of the current user.
    Recommend,

    /// Picks popular movies of the favorite genres of the current user.
    ForYou,

    /// Guesses a movie by its plot.
    Guess {
        /// Description of the plot.
        plot: String,
    },

    /// Generates trivia questions about a movie.
    Trivia {
        /// Title of the movie.
        title: movie::Title,
    },

    /// Generates trivia questions about a movie and saves them.
    GenerateTrivia {
        /// Catalog ID of the movie.
        tmdb_id: TmdbId,
    },

    /// Registers a new user.
    Register {
        /// Username of the new user.
        username: user::Username,

        /// Email of the new user.
        #[arg(long)]
        email: Option<user::Email>,

        /// Password of the new user.
        #[arg(long, env = "MOVIES_PASSWORD", hide_env_values = true)]
        password: user::Password,
    },

    /// Logs in as an existing user.
    Login {
        /// Username of the user.
        username: user::Username,

        /// Password of the user.
        #[arg(long, env = "MOVIES_PASSWORD", hide_env_values = true)]
        password: user::Password,
    },

    /// Ends the current session.
    Logout,

    /// Shows the state of the current session.
    Whoami,

    /// Shows the profile of the current user.
    Profile,

    /// Lists the watch history of the current user.
    History,

    /// Replaces favorite genres of the current user.
    FavoriteGenres {
        /// Catalog IDs of the genres.
        ids: Vec<genre::Id>,
    },

    /// Replaces favorite movies of the current user.
    FavoriteMovies {
        /// Catalog IDs of the movies.
        tmdb_ids: Vec<TmdbId>,
    },

    /// Records watched movies of the current user.
    Watched {
        /// Catalog IDs of the movies.
        tmdb_ids: Vec<TmdbId>,

        /// Rating given to the movies.
        #[arg(long)]
        rating: Option<Rating>,
    },

    /// Replaces all the preferences of the current user at once.
    Preferences {
        /// Catalog ID of a favorite genre.
        #[arg(long = "genre")]
        genres: Vec<genre::Id>,

        /// Catalog ID of a favorite movie.
        #[arg(long = "favorite")]
        favorites: Vec<TmdbId>,

        /// Catalog ID of a watched movie.
        #[arg(long = "watched")]
        watched: Vec<TmdbId>,

        /// Rating given to the watched movies.
        #[arg(long)]
        rating: Option<Rating>,
    },
}
