//! Command-line application for interacting with the movie discovery API
//! through the [`client`].

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

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Used in binary.
use tokio as _;

pub use self::{
    args::Args,
    config::Config,
    error::{AsError, Error},
};

/// [`client::Client`] with filled infrastructure dependencies.
pub type Client = client::Client<client::infra::Http, client::infra::Sled>;
