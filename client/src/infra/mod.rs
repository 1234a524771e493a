//! Infrastructure layer.

pub mod gateway;
pub mod session_store;
pub mod storage;

#[cfg(feature = "sled")]
pub use self::storage::Sled;
pub use self::{
    gateway::{Gateway, Http},
    session_store::SessionStore,
    storage::{Memory, Storage},
};
