//! [`Query`] collection related to the current session.

use std::{convert::Infallible, sync::atomic::Ordering};

use crate::{
    domain::{user::session, User},
    infra::storage,
    Client,
};
#[cfg(doc)]
use crate::domain::Session;

use super::Query;

/// Queries the [`User`] of the current [`Session`], without any remote
/// call.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentUser;

impl<Gw, St> Query<CurrentUser> for Client<Gw, St>
where
    St: storage::Backend,
{
    type Ok = Option<User>;
    type Err = Infallible;

    async fn execute(&self, _: CurrentUser) -> Result<Self::Ok, Self::Err> {
        Ok(self.session_store().current_user().await)
    }
}

/// Queries the [`session::State`] of this client.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionState;

impl<Gw, St> Query<SessionState> for Client<Gw, St>
where
    St: storage::Backend,
{
    type Ok = session::State;
    type Err = Infallible;

    async fn execute(&self, _: SessionState) -> Result<Self::Ok, Self::Err> {
        if self.authenticating.load(Ordering::Acquire) {
            return Ok(session::State::Authenticating);
        }
        Ok(self
            .session_store()
            .current()
            .await
            .map_or(session::State::Anonymous, session::State::Authenticated))
    }
}
