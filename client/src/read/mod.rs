//! Read entities definitions.

pub mod genre;
pub mod movie;

use serde::{Deserialize, Serialize};

/// Acknowledgement of a performed write.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Status {
    /// Human-readable outcome.
    pub status: String,

    /// Indicator whether a new record was created, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
}
