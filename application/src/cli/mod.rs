//! Execution of [`Command`]s.

mod account;
mod ai;
mod catalog;

use std::convert::Infallible;

use client::{
    command::{Logout, Mutated},
    failure::Kind,
    Command as _,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing as log;

use crate::{args::Command, AsError, Client, Error};

/// Executes the provided [`Command`], rendering its outcome as JSON.
///
/// # Errors
///
/// If the [`Command`] fails. Once the backend rejects the token of the
/// current session, the session is ended.
pub async fn run(client: &Client, command: Command) -> Result<Value, Error> {
    use Command as C;

    let authenticating =
        matches!(command, C::Login { .. } | C::Register { .. });

    let outcome = match command {
        C::Popular => catalog::popular(client).await,
        C::Search { query } => catalog::search(client, query).await,
        C::Movie { id } => catalog::movie(client, id).await,
        C::Genres => catalog::genres(client).await,
        C::SyncGenres => catalog::sync_genres(client).await,
        C::SaveMovie { tmdb_id } => catalog::save_movie(client, tmdb_id).await,
        C::Recommend => catalog::recommend(client).await,
        C::ForYou => catalog::for_you(client).await,
        C::Guess { plot } => ai::guess(client, plot).await,
        C::Trivia { title } => ai::trivia(client, title).await,
        C::GenerateTrivia { tmdb_id } => {
            ai::generate_trivia(client, tmdb_id).await
        }
        C::Register {
            username,
            email,
            password,
        } => account::register(client, username, email, password).await,
        C::Login { username, password } => {
            account::login(client, username, password).await
        }
        C::Logout => account::logout(client).await,
        C::Whoami => account::whoami(client).await,
        C::Profile => account::profile(client).await,
        C::History => account::history(client).await,
        C::FavoriteGenres { ids } => account::favorite_genres(client, ids).await,
        C::FavoriteMovies { tmdb_ids } => {
            account::favorite_movies(client, tmdb_ids).await
        }
        C::Watched { tmdb_ids, rating } => {
            account::watched(client, tmdb_ids, rating).await
        }
        C::Preferences {
            genres,
            favorites,
            watched,
            rating,
        } => {
            account::preferences(client, genres, favorites, watched, rating)
                .await
        }
    };

    if let Err(e) = &outcome {
        let rejected = e.code == <&str>::from(Kind::Unauthorized);
        if rejected
            && !authenticating
            && client.session_store().current().await.is_some()
        {
            log::warn!("Session token is rejected, logging out");
            client
                .execute(Logout)
                .await
                .map_err(AsError::into_error)?;
        }
    }
    outcome
}

/// Renders the provided `value` as JSON.
fn render(value: &impl Serialize) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::internal(&e))
}

/// Unwraps the outcome of a local query.
fn local<T>(outcome: Result<T, Infallible>) -> T {
    match outcome {
        Ok(v) => v,
        Err(e) => match e {},
    }
}

/// Renders the provided [`Mutated`] outcome.
///
/// A failed refresh is reported, but doesn't fail the command.
fn mutated(outcome: Mutated) -> Result<Value, Error> {
    let Mutated { status, refresh } = outcome;
    let profile = refresh.unwrap_or_else(|e| {
        log::warn!("`Profile` is not refreshed: {e}");
        None
    });
    Ok(json!({
        "status": render(&status)?,
        "profile": render(&profile)?,
    }))
}

#[cfg(test)]
mod tests {
    use std::env;

    use client::infra::{gateway::http, storage::sled, Http, Sled};
    use url::Url;

    use crate::{args::Command, Client};

    use super::run;

    fn client(name: &str) -> Client {
        let sled = Sled::open(&sled::Config {
            path: env::temp_dir()
                .join(format!("movies-cli-{}-{name}", std::process::id())),
            temporary: true,
        })
        .unwrap();
        let http = Http::new(http::Config {
            base_url: Url::parse("http://127.0.0.1:9/api/").unwrap(),
            auth_scheme: "Token".into(),
        })
        .unwrap();
        Client::new(client::Config::default(), http, sled)
    }

    #[tokio::test]
    async fn anonymous_without_login() {
        let client = client("whoami");

        let out = run(&client, Command::Whoami).await.unwrap();

        assert_eq!(out["state"], "anonymous");
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() {
        let client = client("logout");

        let out = run(&client, Command::Logout).await.unwrap();

        assert_eq!(out["status"], "Logged out");
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let client = client("network");

        let err = run(&client, Command::Popular).await.unwrap_err();

        assert_eq!(err.code, "NETWORK");
        assert!(err.backtrace.is_some());
    }

    #[tokio::test]
    async fn short_plot_is_rejected_locally() {
        let client = client("plot");

        let err = run(
            &client,
            Command::Guess {
                plot: "a heist".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, "PLOT_TOO_SHORT");
    }

    #[tokio::test]
    async fn anonymous_for_you_needs_no_profile() {
        let client = client("for-you");

        let err = run(&client, Command::ForYou).await.unwrap_err();

        assert_eq!(err.code, "NETWORK");
    }
}
