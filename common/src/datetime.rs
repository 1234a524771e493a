//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{format_description::well_known::Rfc3339, UtcOffset};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Returns the Unix timestamp of this [`DateTime`].
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(E::Parse)?
            .try_into()
            .map_err(E::ComponentRange)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// Failed to parse the string into an [`DateTime`].
    Parse(time::error::Parse),

    /// Parsed [`DateTime`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<Of: ?Sized> TryFrom<time::OffsetDateTime> for DateTimeOf<Of> {
    type Error = time::error::ComponentRange;

    fn try_from(dt: time::OffsetDateTime) -> Result<Self, Self::Error> {
        dt.to_offset(UtcOffset::UTC)
            .replace_microsecond(dt.microsecond())
            .map(|inner| Self {
                inner,
                _of: PhantomData,
            })
    }
}

impl<Of: ?Sized> From<DateTimeOf<Of>> for time::OffsetDateTime {
    fn from(dt: DateTimeOf<Of>) -> Self {
        dt.inner
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod rfc3339 {
        //! Module providing serialization and deserialization of [`DateTimeOf`]
        //! as an [RFC 3339] string.
        //!
        //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        use super::DateTimeOf;

        /// Serializes the [`DateTimeOf`] as an [RFC 3339] string.
        ///
        /// # Errors
        ///
        /// Never errors on its own, only propagates `serializer` errors.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn serialize<Of, S>(
            dt: &DateTimeOf<Of>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Of: ?Sized,
        {
            serializer.serialize_str(&dt.to_rfc3339())
        }

        /// Deserializes an [RFC 3339] string into a [`DateTimeOf`].
        ///
        /// # Errors
        ///
        /// Returns an error if the string is not a valid [RFC 3339] date and
        /// time.
        ///
        /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
        pub fn deserialize<'de, D, Of>(
            deserializer: D,
        ) -> Result<DateTimeOf<Of>, D::Error>
        where
            D: Deserializer<'de>,
            Of: ?Sized,
        {
            let s = String::deserialize(deserializer)?;
            DateTimeOf::from_rfc3339(&s).map_err(Error::custom)
        }

        pub mod lenient {
            //! Optional [RFC 3339] representation degrading to [`None`] on
            //! malformed input instead of failing the whole deserialization.
            //!
            //! [RFC 3339]: https://tools.ietf.org/html/rfc3339

            use serde::{Deserialize, Deserializer, Serializer};

            use super::DateTimeOf;

            /// Serializes the optional [`DateTimeOf`] as an [RFC 3339] string
            /// or `null`.
            ///
            /// # Errors
            ///
            /// Never errors on its own, only propagates `serializer` errors.
            ///
            /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
            pub fn serialize<Of, S>(
                dt: &Option<DateTimeOf<Of>>,
                serializer: S,
            ) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
                Of: ?Sized,
            {
                match dt {
                    Some(dt) => super::serialize(dt, serializer),
                    None => serializer.serialize_none(),
                }
            }

            /// Deserializes an optional [RFC 3339] string, yielding [`None`]
            /// for `null` and for strings that are not valid [RFC 3339].
            ///
            /// # Errors
            ///
            /// Returns an error only if the value is neither a string nor
            /// `null`.
            ///
            /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
            pub fn deserialize<'de, D, Of>(
                deserializer: D,
            ) -> Result<Option<DateTimeOf<Of>>, D::Error>
            where
                D: Deserializer<'de>,
                Of: ?Sized,
            {
                Ok(Option::<String>::deserialize(deserializer)?
                    .and_then(|s| DateTimeOf::from_rfc3339(&s).ok()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateTime;

    #[test]
    fn parses_rfc3339_with_fraction() {
        let dt = DateTime::from_rfc3339("2024-03-01T10:20:30.123456Z").unwrap();

        assert_eq!(dt.unix_timestamp(), 1_709_288_430);
        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:20:30.123456Z");
    }

    #[test]
    fn normalizes_offset_to_utc() {
        let dt = DateTime::from_rfc3339("2024-03-01T12:20:30+02:00").unwrap();

        assert_eq!(dt.to_rfc3339(), "2024-03-01T10:20:30Z");
    }

    #[test]
    fn rejects_naive_datetime() {
        assert!(DateTime::from_rfc3339("2024-03-01T10:20:30").is_err());
    }

    #[test]
    fn orders_chronologically() {
        let later = DateTime::from_rfc3339("2024-03-01T10:20:30Z").unwrap();
        let earlier =
            DateTime::from_rfc3339("2024-03-01T11:20:30+02:00").unwrap();

        assert!(earlier < later);
        assert_eq!(later.unix_timestamp() - earlier.unix_timestamp(), 3600);
    }

    #[cfg(feature = "serde")]
    mod serde {
        use serde::{Deserialize, Serialize};

        use crate::DateTime;

        #[derive(Deserialize, Serialize)]
        struct Strict {
            #[serde(with = "crate::datetime::serde::rfc3339")]
            at: DateTime,
        }

        #[derive(Deserialize, Serialize)]
        struct Lenient {
            #[serde(
                default,
                with = "crate::datetime::serde::rfc3339::lenient"
            )]
            at: Option<DateTime>,
        }

        #[test]
        fn strict_round_trips() {
            let json = r#"{"at":"2024-03-01T10:20:30Z"}"#;
            let v: Strict = serde_json::from_str(json).unwrap();

            assert_eq!(serde_json::to_string(&v).unwrap(), json);
        }

        #[test]
        fn lenient_degrades_to_none() {
            let v: Lenient =
                serde_json::from_str(r#"{"at":"yesterday"}"#).unwrap();
            assert!(v.at.is_none());

            let v: Lenient = serde_json::from_str(r#"{"at":null}"#).unwrap();
            assert!(v.at.is_none());

            let v: Lenient = serde_json::from_str("{}").unwrap();
            assert!(v.at.is_none());

            let v: Lenient =
                serde_json::from_str(r#"{"at":"2024-03-01T10:20:30Z"}"#)
                    .unwrap();
            assert_eq!(v.at.unwrap().unix_timestamp(), 1_709_288_430);
        }
    }
}
