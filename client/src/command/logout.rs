//! [`Command`] for ending the current [`Session`].

use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::{domain::Session, infra::SessionStore};
use crate::{
    infra::{session_store, storage},
    Client,
};

use super::Command;

/// [`Command`] for ending the current [`Session`], clearing the whole
/// [`SessionStore`].
///
/// No remote call is made, and logging out without a [`Session`] is a
/// no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logout;

impl<Gw, St> Command<Logout> for Client<Gw, St>
where
    St: storage::Backend,
{
    type Ok = ();
    type Err = Traced<session_store::Error>;

    async fn execute(&self, _: Logout) -> Result<Self::Ok, Self::Err> {
        self.session_store()
            .clear()
            .await
            .map_err(tracerr::wrap!())?;
        log::debug!("`Session` cleared");
        Ok(())
    }
}
