//! [`Command`] for authenticating a [`User`].

use std::sync::atomic::{AtomicBool, Ordering};

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use serde::Deserialize;
use serde_json::json;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{self, Session, Token},
        User,
    },
    infra::{
        gateway::{self, Request, Response},
        session_store, storage, Gateway,
    },
    Client, Failure,
};
#[cfg(doc)]
use crate::infra::SessionStore;

use super::Command;

/// [`Command`] for authenticating a [`User`], either an existing or a new
/// one.
///
/// Only one [`Authenticate`] may be in progress per [`Client`] at a time.
#[derive(Clone, Debug)]
pub enum Authenticate {
    /// Log in as an existing [`User`].
    Login {
        /// [`user::Username`] of the [`User`].
        username: user::Username,

        /// [`user::Password`] of the [`User`].
        password: SecretBox<user::Password>,
    },

    /// Register a new [`User`].
    Register {
        /// [`user::Username`] of the new [`User`].
        username: user::Username,

        /// [`user::Email`] of the new [`User`].
        email: Option<user::Email>,

        /// [`user::Password`] of the new [`User`].
        password: SecretBox<user::Password>,
    },
}

impl Authenticate {
    /// Composes the [`Request`] of this [`Authenticate`].
    fn request(&self) -> Request {
        let body = match self {
            Self::Login { username, password } => json!({
                "action": "login",
                "username": username.to_string(),
                "password": AsRef::<str>::as_ref(password.expose_secret()),
            }),
            Self::Register {
                username,
                email,
                password,
            } => {
                let mut body = json!({
                    "action": "register",
                    "username": username.to_string(),
                    "password": AsRef::<str>::as_ref(password.expose_secret()),
                });
                if let Some(email) = email {
                    body["email"] = email.to_string().into();
                }
                body
            }
        };
        Request::post("/auth/").body(body)
    }
}

/// Successful response to [`Authenticate`].
#[derive(Debug, Deserialize)]
struct Authenticated {
    /// Issued token, if any.
    #[serde(default)]
    token: Option<String>,

    /// ID of the authenticated [`User`].
    user_id: user::Id,

    /// [`user::Username`] of the authenticated [`User`].
    username: user::Username,
}

impl<Gw, St> Command<Authenticate> for Client<Gw, St>
where
    Gw: Gateway<Perform<Request>, Ok = Response, Err = Traced<gateway::Error>>,
    St: storage::Backend,
{
    /// [`Session`] persisted into the [`SessionStore`], if the backend has
    /// issued a [`Token`].
    type Ok = Option<Session>;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Authenticate) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Some(_guard) = Authenticating::mark(&self.authenticating) else {
            return Err(tracerr::new!(E::InProgress));
        };

        let resp = self
            .fetch::<Authenticated>(cmd.request())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let Some(token) = resp.token.and_then(Token::new) else {
            log::debug!("No token issued for `{}`", resp.username);
            return Ok(None);
        };
        let session = Session {
            user: User {
                id: resp.user_id,
                username: resp.username,
                preferences: None,
            },
            token,
        };
        self.session_store()
            .save(&session)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::debug!("`Session` of `{}` saved", session.user.username);

        Ok(Some(session))
    }
}

/// Mark of an [`Authenticate`] in progress, unset once dropped.
#[derive(Debug)]
struct Authenticating<'a>(&'a AtomicBool);

impl<'a> Authenticating<'a> {
    /// Sets the provided `flag`, unless it is set already.
    fn mark(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self(flag))
    }
}

impl Drop for Authenticating<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Error of [`Authenticate`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Another [`Authenticate`] is in progress.
    #[display("Authentication is already in progress")]
    InProgress,

    /// Backend has rejected the [`Authenticate`], or cannot be reached.
    #[display("Authentication failed: {_0}")]
    Failure(Failure),

    /// [`SessionStore`] error.
    #[display("Failed to save `Session`: {_0}")]
    Storage(session_store::Error),
}

#[cfg(test)]
mod tests {
    use secrecy::SecretBox;
    use serde_json::json;

    use crate::{
        command::Command as _,
        domain::user::{self, session::State, Token},
        failure::Kind,
        infra::gateway::mock::Recording,
        query::{
            tests::{authenticated, client},
            SessionState,
        },
    };

    use super::{Authenticate, ExecutionError};

    fn login(password: &str) -> Authenticate {
        Authenticate::Login {
            username: user::Username::new("neo").unwrap(),
            password: SecretBox::new(Box::new(
                user::Password::new(password).unwrap(),
            )),
        }
    }

    #[tokio::test]
    async fn login_stores_session() {
        let gateway = Recording::default().ok(json!({
            "token": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b",
            "user_id": 1,
            "username": "neo",
        }));
        let client = client(gateway.clone());

        let session = client.execute(login("trinity")).await.unwrap().unwrap();

        let store = client.session_store();
        assert_eq!(
            store.token().await,
            Token::new("9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b"),
        );
        assert_eq!(
            store.current_user().await.map(|u| u.username.to_string()),
            Some("neo".to_owned()),
        );
        assert_eq!(store.current().await, Some(session));
        assert_eq!(
            gateway.requests()[0].body,
            Some(json!({
                "action": "login",
                "username": "neo",
                "password": "trinity",
            })),
        );
    }

    #[tokio::test]
    async fn no_token_leaves_store_untouched() {
        let gateway = Recording::default()
            .ok(json!({"user_id": 2, "username": "morpheus"}));
        let client = client(gateway);

        let session = client
            .execute(Authenticate::Register {
                username: user::Username::new("morpheus").unwrap(),
                email: user::Email::new("morpheus@zion.io"),
                password: SecretBox::new(Box::new(
                    user::Password::new("red-pill").unwrap(),
                )),
            })
            .await
            .unwrap();

        assert_eq!(session, None);
        assert_eq!(client.session_store().token().await, None);
        assert_eq!(client.session_store().current_user().await, None);
    }

    #[tokio::test]
    async fn login_without_token_keeps_previous_session() {
        let gateway = Recording::default()
            .ok(json!({"user_id": 1, "username": "neo"}));
        let client = authenticated(gateway).await;
        let before = client.session_store().current().await;
        assert!(before.is_some());

        let session = client.execute(login("trinity")).await.unwrap();

        assert_eq!(session, None);
        assert_eq!(client.session_store().current().await, before);
    }

    #[tokio::test]
    async fn register_sends_email() {
        let gateway = Recording::default().ok(json!({
            "token": "abc",
            "user_id": 2,
            "username": "morpheus",
        }));
        let client = client(gateway.clone());

        _ = client
            .execute(Authenticate::Register {
                username: user::Username::new("morpheus").unwrap(),
                email: user::Email::new("morpheus@zion.io"),
                password: SecretBox::new(Box::new(
                    user::Password::new("red-pill").unwrap(),
                )),
            })
            .await
            .unwrap();

        let body = gateway.requests()[0].body.clone().unwrap();
        assert_eq!(body["action"], "register");
        assert_eq!(body["email"], "morpheus@zion.io");
    }

    #[tokio::test]
    async fn wrong_credentials_are_unauthorized() {
        let gateway = Recording::default()
            .status(401, json!({"error": "Invalid credentials"}));
        let client = client(gateway);

        let err = client.execute(login("wrong")).await.unwrap_err();

        let ExecutionError::Failure(failure) = err.as_ref() else {
            panic!("expected `Failure`, got: {err}");
        };
        assert_eq!(failure.kind, Kind::Unauthorized);
        assert_eq!(failure.message.as_deref(), Some("Invalid credentials"));
        assert_eq!(client.session_store().current().await, None);
        assert_eq!(client.execute(SessionState).await.unwrap(), State::Anonymous);
    }

    #[tokio::test]
    async fn allows_retry_after_failure() {
        let gateway = Recording::default()
            .status(401, json!({"error": "Invalid credentials"}))
            .ok(json!({"token": "abc", "user_id": 1, "username": "neo"}));
        let client = client(gateway.clone());

        _ = client.execute(login("wrong")).await.unwrap_err();
        let session = client.execute(login("trinity")).await.unwrap();

        assert!(session.is_some());
        assert_eq!(gateway.calls(), ["POST /auth/", "POST /auth/"]);
    }

    #[tokio::test]
    async fn rejects_concurrent_submission() {
        let (gateway, gate) = Recording::gated();
        let gateway = gateway.ok(json!({
            "token": "abc",
            "user_id": 1,
            "username": "neo",
        }));
        let client = client(gateway.clone());

        let (first, second) = tokio::join!(
            client.execute(login("trinity")),
            async {
                let state = client.execute(SessionState).await.unwrap();
                let second = client.execute(login("trinity")).await;
                gate.notify_one();
                (state, second)
            },
        );

        assert!(first.unwrap().is_some());
        let (state, second) = second;
        assert_eq!(state, State::Authenticating);
        assert!(matches!(
            second.unwrap_err().as_ref(),
            ExecutionError::InProgress,
        ));
        assert_eq!(gateway.calls(), ["POST /auth/"]);
    }
}
