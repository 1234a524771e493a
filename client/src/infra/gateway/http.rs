//! [`Http`] [`Gateway`] implementation.

use ::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue,
};
use common::operations::Perform;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;
use url::Url;

use super::{Error, Gateway, Request, Response};

/// JSON media type.
const JSON: &str = "application/json";

/// [`Http`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the backend API.
    #[default(Url::parse("http://127.0.0.1:8000/api/").expect("valid URL"))]
    pub base_url: Url,

    /// Scheme of the `Authorization` header.
    #[default("Token".to_owned())]
    pub auth_scheme: String,
}

/// [`Gateway`] talking to the backend API over HTTP.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    client: reqwest::Client,

    /// [`Config`] of this [`Http`] gateway.
    config: Config,
}

impl Http {
    /// Creates a new [`Http`] gateway with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying [`reqwest::Client`] cannot be built.
    pub fn new(mut config: Config) -> Result<Self, Traced<Error>> {
        if !config.base_url.path().ends_with('/') {
            let path = format!("{}/", config.base_url.path());
            config.base_url.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self { client, config })
    }

    /// Returns [`Config`] of this [`Http`] gateway.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Composes a [`reqwest::Request`] out of the provided [`Request`].
    ///
    /// # Errors
    ///
    /// If the URL or headers of the [`Request`] cannot be composed.
    pub fn build(&self, req: &Request) -> Result<reqwest::Request, Traced<Error>> {
        let url = self
            .config
            .base_url
            .join(req.path.trim_start_matches('/'))
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let mut builder = self
            .client
            .request(req.method.clone(), url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            builder = builder.body(body.to_string());
        }
        if let Some(token) = &req.token {
            let mut value = HeaderValue::from_str(&format!(
                "{} {}",
                self.config.auth_scheme,
                token.as_ref(),
            ))
            .map_err(tracerr::from_and_wrap!(=> Error))?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }

        builder.build().map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Gateway<Perform<Request>> for Http {
    type Ok = Response;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Perform(req): Perform<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = self.build(&req).map_err(tracerr::wrap!())?;
        log::debug!("{} {}", request.method(), request.url().path());

        let resp = self
            .client
            .execute(request)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?
            .to_vec();

        let response = Response { status, body };
        if status.is_success() {
            Ok(response)
        } else {
            Err(tracerr::new!(Error::Status(response)))
        }
    }
}
