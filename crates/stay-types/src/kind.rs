use std::fmt;

use serde::{Deserialize, Serialize};

/// The concrete variant of a stored record.
///
/// `EntityKind` is the single discriminator carried by every [`Record`]:
/// snapshot entries name it in their `__class__` field, and the store filters
/// by comparing discriminant values. The name strings are part of the
/// snapshot format and must not change.
///
/// [`Record`]: crate::Record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Generic base variant with no type-specific fields.
    BaseModel,
    /// A registered account.
    User,
    /// A rentable listing.
    Place,
    /// A user's review of a place.
    Review,
    /// A bookable feature (wifi, pool, ...).
    Amenity,
    /// A city within a state.
    City,
    /// A top-level region grouping cities.
    State,
}

impl EntityKind {
    /// Every kind, in the order the snapshot format enumerates them.
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Amenity,
        EntityKind::BaseModel,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
        EntityKind::State,
        EntityKind::User,
    ];

    /// The class-name string used in snapshot `__class__` markers and
    /// composite keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::Place => "Place",
            Self::Review => "Review",
            Self::Amenity => "Amenity",
            Self::City => "City",
            Self::State => "State",
        }
    }

    /// Resolve a class-name string back to a kind.
    ///
    /// Returns `None` for unrecognized names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BaseModel" => Some(Self::BaseModel),
            "User" => Some(Self::User),
            "Place" => Some(Self::Place),
            "Review" => Some(Self::Review),
            "Amenity" => Some(Self::Amenity),
            "City" => Some(Self::City),
            "State" => Some(Self::State),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(EntityKind::from_name("Booking"), None);
        assert_eq!(EntityKind::from_name(""), None);
        assert_eq!(EntityKind::from_name("user"), None);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::User), "User");
        assert_eq!(format!("{}", EntityKind::BaseModel), "BaseModel");
    }

    #[test]
    fn all_contains_every_kind_once() {
        assert_eq!(EntityKind::ALL.len(), 7);
        for kind in EntityKind::ALL {
            assert_eq!(
                EntityKind::ALL.iter().filter(|k| **k == kind).count(),
                1
            );
        }
    }
}
