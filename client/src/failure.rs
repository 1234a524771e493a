//! [`Failure`] definitions.

use common::define_kind;
use derive_more::{Display, Error};

use crate::infra::gateway;

define_kind! {
    #[doc = "Kind of a [`Failure`]."]
    enum Kind {
        #[doc = "Backend cannot be reached or the exchange broke off."]
        Network = 1,

        #[doc = "Request cannot be composed on the client side."]
        InvalidRequest = 2,

        #[doc = "Backend rejected the request as invalid."]
        BadRequest = 3,

        #[doc = "Request lacks valid credentials."]
        Unauthorized = 4,

        #[doc = "Credentials are valid, but not sufficient."]
        Forbidden = 5,

        #[doc = "Requested resource doesn't exist."]
        NotFound = 6,

        #[doc = "Backend failed to serve the request."]
        Server = 7,

        #[doc = "Response body doesn't match the expected shape."]
        Decode = 8,
    }
}

/// Normalized failure of a backend API call.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
#[display(
    "{kind}{}",
    message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
)]
pub struct Failure {
    /// [`Kind`] of this [`Failure`].
    pub kind: Kind,

    /// Human-readable message extracted from the response, if any.
    pub message: Option<String>,

    /// HTTP status of the response, if any was received.
    pub status: Option<u16>,
}

impl Failure {
    /// Creates a new [`Failure`] of the provided [`Kind`] without any
    /// message.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
        }
    }

    /// Creates a new [`Kind::Decode`] [`Failure`] out of the provided
    /// JSON error.
    #[must_use]
    pub fn decode(err: &serde_json::Error) -> Self {
        Self {
            kind: Kind::Decode,
            message: Some(err.to_string()),
            status: None,
        }
    }

    /// Indicates whether the credentials of the call were rejected.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind == Kind::Unauthorized
    }
}

impl From<gateway::Error> for Failure {
    fn from(err: gateway::Error) -> Self {
        use gateway::Error as E;

        match err {
            E::Transport(e) if e.is_builder() => Self {
                kind: Kind::InvalidRequest,
                message: Some(e.to_string()),
                status: None,
            },
            E::Transport(_) => Self::new(Kind::Network),
            E::Url(e) => Self {
                kind: Kind::InvalidRequest,
                message: Some(e.to_string()),
                status: None,
            },
            E::Header(e) => Self {
                kind: Kind::InvalidRequest,
                message: Some(e.to_string()),
                status: None,
            },
            E::Status(resp) => {
                let kind = match resp.status.as_u16() {
                    400 | 422 => Kind::BadRequest,
                    401 => Kind::Unauthorized,
                    403 => Kind::Forbidden,
                    404 => Kind::NotFound,
                    _ => Kind::Server,
                };
                Self {
                    kind,
                    message: resp.error_message(),
                    status: Some(resp.status.as_u16()),
                }
            }
        }
    }
}
