//! Domain definitions.

pub mod ai;
pub mod genre;
pub mod movie;
pub mod preferences;
pub mod user;

pub use self::{
    genre::Genre,
    movie::Movie,
    preferences::Preferences,
    user::{Profile, Session, User},
};
