//! [`Storage`]-related implementations.

mod memory;
#[cfg(feature = "sled")]
pub mod sled;

use std::string::FromUtf8Error;

use common::operations::{By, Select, Update};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

#[cfg(feature = "sled")]
pub use self::sled::Sled;
pub use self::memory::Memory;

/// Client-side key-value storage operation.
pub use common::Handler as Storage;

/// Key of an entry persisted in a [`Storage`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Key {
    /// Access token of the current session.
    Token,

    /// Cached record of the current user.
    User,

    /// Cached profile of the current user.
    Profile,
}

impl Key {
    /// All the [`Key`]s owned by a session.
    pub const ALL: [Self; 3] = [Self::Token, Self::User, Self::Profile];

    /// Returns the stable string representation of this [`Key`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Token => "authToken",
            Self::User => "user",
            Self::Profile => "currentUserProfile",
        }
    }
}

/// Single change of a [`Batch`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Change {
    /// Puts the value under the [`Key`], replacing the previous one.
    Put(Key, String),

    /// Removes the value under the [`Key`], if any.
    Remove(Key),
}

/// Set of [`Change`]s applied to a [`Storage`] as a whole.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Batch(Vec<Change>);

impl Batch {
    /// Adds a [`Change::Put`] to this [`Batch`].
    #[must_use]
    pub fn put(mut self, key: Key, value: impl Into<String>) -> Self {
        self.0.push(Change::Put(key, value.into()));
        self
    }

    /// Adds a [`Change::Remove`] to this [`Batch`].
    #[must_use]
    pub fn remove(mut self, key: Key) -> Self {
        self.0.push(Change::Remove(key));
        self
    }
}

impl IntoIterator for Batch {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "sled")]
    /// [`Sled`] error.
    #[display("`sled` operation failed: {_0}")]
    Sled(::sled::Error),

    /// Stored value is not a valid UTF-8 string.
    #[display("Stored value is not UTF-8: {_0}")]
    Utf8(FromUtf8Error),
}

/// [`Storage`] able to read single entries and apply [`Batch`]es.
pub trait Backend:
    Storage<
        Select<By<Option<String>, Key>>,
        Ok = Option<String>,
        Err = Traced<Error>,
    > + Storage<Update<Batch>, Ok = (), Err = Traced<Error>>
{
}

impl<T> Backend for T where
    T: Storage<
            Select<By<Option<String>, Key>>,
            Ok = Option<String>,
            Err = Traced<Error>,
        > + Storage<Update<Batch>, Ok = (), Err = Traced<Error>>
{
}
