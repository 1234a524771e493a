//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// The defined enum is displayed, parsed and converted into a
/// `&'static str` in `SCREAMING_SNAKE_CASE`, which makes its variants usable
/// as stable machine-readable codes.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// #
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = 1,
///
///         #[doc = "A sphere"]
///         FlatSphere = 2,
///     }
/// }
///
/// assert_eq!(Kind::FlatSphere.to_string(), "FLAT_SPHERE");
/// assert_eq!(<&str>::from(Kind::Cube), "CUBE");
/// assert_eq!("CUBE".parse::<Kind>().unwrap(), Kind::Cube);
/// assert_eq!(Kind::FlatSphere.u8(), 2);
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            $crate::private::strum::IntoStaticStr,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }

        impl $name {
            /// Converts this into its [`u8`] representation.
            #[must_use]
            pub const fn u8(self) -> u8 {
                self as u8
            }
        }
    };
}
