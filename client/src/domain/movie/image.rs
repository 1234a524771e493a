//! Catalog image definitions.

use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

/// Base URL of the catalog images.
pub const BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Path of a catalog image, relative to the [`BASE_URL`] and an
/// [`ImageSize`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct ImagePath(String);

impl ImagePath {
    /// Composes a full URL of this [`ImagePath`] in the provided
    /// [`ImageSize`].
    ///
    /// Returns [`None`] if this [`ImagePath`] is empty.
    #[must_use]
    pub fn url(&self, size: ImageSize) -> Option<String> {
        (!self.0.is_empty()).then(|| format!("{BASE_URL}{size}{}", self.0))
    }
}

/// Size of a catalog image.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumString,
    Eq,
    IntoStaticStr,
    PartialEq,
)]
#[strum(serialize_all = "lowercase")]
pub enum ImageSize {
    /// 92 pixels wide thumbnail.
    #[display("w92")]
    W92,

    /// 185 pixels wide image.
    #[display("w185")]
    W185,

    /// 200 pixels wide image.
    #[display("w200")]
    W200,

    /// 500 pixels wide image.
    #[default]
    #[display("w500")]
    W500,

    /// Image in its original size.
    #[display("original")]
    Original,
}
