//! Integer identifiers for the persisted entities.
//!
//! Each entity gets its own newtype so a project id can never be passed where
//! a user id is expected. Identifiers mirror PostgreSQL `serial` keys.

use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database key.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// The raw database key.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }
    };
}

entity_id! {
    /// Primary key of a user account.
    UserId
}

entity_id! {
    /// Primary key of a project.
    ProjectId
}

entity_id! {
    /// Primary key of a team.
    TeamId
}

entity_id! {
    /// Primary key of a status update.
    StatusId
}
