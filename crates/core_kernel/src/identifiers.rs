//! Typed identifiers
//!
//! Payments point at policies and policies point at clients by id alone, so
//! each kind of reference gets its own newtype. Ids render with a short
//! prefix (`POL-…`) in logs and parse from either the prefixed or the bare
//! UUID form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from parsing an identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("expected a {expected} id, found prefix '{found}'")]
    WrongPrefix { expected: &'static str, found: String },

    #[error("malformed id: {0}")]
    Malformed(#[from] uuid::Error),
}

/// Splits an optional three-letter prefix off `s`
///
/// A bare UUID never has a dash after its third character, so the split is
/// unambiguous.
fn strip_prefix<'a>(s: &'a str, expected: &'static str) -> Result<&'a str, IdError> {
    match s.split_once('-') {
        Some((head, rest)) if head.len() == 3 && head.chars().all(|c| c.is_ascii_alphabetic()) => {
            if head.eq_ignore_ascii_case(expected) {
                Ok(rest)
            } else {
                Err(IdError::WrongPrefix {
                    expected,
                    found: head.to_string(),
                })
            }
        }
        _ => Ok(s),
    }
}

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix used when rendering
            pub const PREFIX: &'static str = $prefix;

            /// Random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered identifier; sorts by creation
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let body = strip_prefix(s.trim(), Self::PREFIX)?;
                Ok(Self(Uuid::parse_str(body)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

typed_id!(
    /// An agency client, the owner of policies
    ClientId => "CLI"
);
typed_id!(
    /// A policy held by a client
    PolicyId => "POL"
);
typed_id!(
    /// A recorded premium payment
    PaymentId => "PAY"
);
