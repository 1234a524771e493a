//! [`Session`] definitions.

use derive_more::{AsRef, Debug};
use serde::{Deserialize, Serialize};

use super::User;

/// Session of the currently authenticated [`User`].
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// [`User`] owning this [`Session`].
    pub user: User,

    /// Access [`Token`] of this [`Session`].
    pub token: Token,
}

/// Access token of a [`Session`].
///
/// Its value is redacted from the [`Debug`] output.
#[derive(AsRef, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[as_ref(str)]
#[debug("Token(***)")]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not empty.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.is_empty()).then_some(Self(token))
    }
}

impl TryFrom<String> for Token {
    type Error = &'static str;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token).ok_or("empty `Token`")
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// State of the client session.
#[derive(Clone, Debug, PartialEq)]
pub enum State {
    /// No [`User`] is authenticated.
    Anonymous,

    /// Authentication is in progress.
    Authenticating,

    /// [`User`] is authenticated within the [`Session`].
    Authenticated(Session),
}
