//! Client of the movie discovery API, keeping the session of its user.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod failure;
pub mod infra;
pub mod query;
pub mod read;

use std::sync::{atomic::AtomicBool, Arc};

use common::operations::Perform;
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use self::{
    failure::Kind,
    infra::{
        gateway::{self, Request, Response},
        storage, Gateway, SessionStore,
    },
};

pub use self::{command::Command, failure::Failure, query::Query};

/// [`Client`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Maximum number of movies picked by [`query::ForYou`].
    #[default(10)]
    pub for_you_limit: usize,
}

/// Client of the movie discovery API.
///
/// Clones share the same [`SessionStore`] and authentication guard.
#[derive(Clone, Debug)]
pub struct Client<Gw, St> {
    /// Configuration of this [`Client`].
    config: Config,

    /// [`Gateway`] of this [`Client`].
    gateway: Gw,

    /// [`SessionStore`] of this [`Client`].
    sessions: SessionStore<St>,

    /// Indicator whether an authentication is in progress.
    authenticating: Arc<AtomicBool>,
}

impl<Gw, St> Client<Gw, St> {
    /// Creates a new [`Client`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, gateway: Gw, storage: St) -> Self {
        Self {
            config,
            gateway,
            sessions: SessionStore::new(storage),
            authenticating: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns [`Config`] of this [`Client`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Gateway`] of this [`Client`].
    #[must_use]
    pub fn gateway(&self) -> &Gw {
        &self.gateway
    }

    /// Returns [`SessionStore`] of this [`Client`].
    #[must_use]
    pub fn session_store(&self) -> &SessionStore<St> {
        &self.sessions
    }
}

impl<Gw, St> Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    /// Sends the provided [`Request`] on behalf of the current session.
    async fn send(&self, request: Request) -> Result<Response, Traced<Failure>> {
        let request = request.authorized(self.sessions.token().await);
        let method = request.method.clone();
        let path = request.path.clone();

        self.gateway
            .execute(Perform(request))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Failure))
            .inspect_err(|e| {
                let failure = e.as_ref();
                match failure.kind {
                    Kind::Network | Kind::Server | Kind::Decode => {
                        log::error!("`{method} {path}` failed: {failure}");
                    }
                    Kind::InvalidRequest
                    | Kind::BadRequest
                    | Kind::Unauthorized
                    | Kind::Forbidden
                    | Kind::NotFound => {
                        log::warn!("`{method} {path}` failed: {failure}");
                    }
                }
            })
    }

    /// Sends the provided [`Request`] and decodes its JSON response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, Traced<Failure>> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.send(request).await.map_err(tracerr::wrap!())?;
        response.json().map_err(|e| {
            let failure = Failure::decode(&e);
            log::error!("`{method} {path}` failed: {failure}");
            tracerr::new!(failure)
        })
    }
}
