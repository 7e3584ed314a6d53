//! Closed registries keyed by discriminator strings
//!
//! Field types, relation kinds and component kinds are all chosen by name at the
//! prompt or on the command line. Each is a plain enum with a fixed key table; the
//! [`Registry`] trait gives them a uniform `exists` / `from_key` surface.

use crate::error::{MakerError, Result};

pub trait Registry: Sized + Copy + 'static {
    /// Human-readable registry name used in error messages
    const NAME: &'static str;

    /// Every variant, in display order
    const ALL: &'static [Self];

    fn key(&self) -> &'static str;

    fn lookup(key: &str) -> Option<Self>;

    fn exists(key: &str) -> bool {
        Self::lookup(key).is_some()
    }

    fn from_key(key: &str) -> Result<Self> {
        Self::lookup(key).ok_or_else(|| MakerError::UnknownType {
            registry: Self::NAME,
            key: key.to_string(),
            expected: Self::keys().join(", "),
        })
    }

    fn keys() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::key).collect()
    }
}

/// Declare a closed registry enum together with its key table.
///
/// The generated `lookup` is a `match` over string literals, so the table is fixed at
/// compile time and can never be extended at runtime.
#[macro_export]
macro_rules! closed_registry {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $registry:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::registry::Registry for $name {
            const NAME: &'static str = $registry;
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn key(&self) -> &'static str {
                match self {
                    $( $name::$variant => $key ),+
                }
            }

            fn lookup(key: &str) -> Option<Self> {
                match key {
                    $( $key => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::registry::Registry::key(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::MakerError;

            fn from_str(key: &str) -> std::result::Result<Self, Self::Err> {
                <$name as $crate::registry::Registry>::from_key(key)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    closed_registry! {
        enum Colour: "colour" {
            Red => "red",
            Green => "green",
        }
    }

    #[test]
    fn test_lookup_known_keys() {
        assert!(Colour::exists("red"));
        assert_eq!(Colour::from_key("green").unwrap(), Colour::Green);
        assert_eq!("red".parse::<Colour>().unwrap(), Colour::Red);
        assert_eq!(Colour::Green.to_string(), "green");
    }

    #[test]
    fn test_unknown_key_lists_expected() {
        assert!(!Colour::exists("blue"));
        match Colour::from_key("blue") {
            Err(MakerError::UnknownType {
                registry,
                key,
                expected,
            }) => {
                assert_eq!(registry, "colour");
                assert_eq!(key, "blue");
                assert_eq!(expected, "red, green");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
