//! Strongly-typed ID wrappers for meals and workouts
//!
//! Meal ids and workout ids live in independent namespaces; distinct newtypes
//! keep them from being mixed up at compile time. Fresh ids come from an
//! [`IdGenerator`] so tests can make them deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Source of fresh entry ids
pub trait IdGenerator {
    /// Produce the next id
    fn next_uuid(&mut self) -> Uuid;
}

/// Random v4 UUIDs, used by the binary
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counts upward from one; deterministic output for tests
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    next: u128,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_uuid(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Draw a fresh ID from a generator
            pub fn generate(ids: &mut impl IdGenerator) -> Self {
                Self(ids.next_uuid())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-supplied identifier refers to this ID.
            ///
            /// Accepts the full UUID, the short display form, or any UUID
            /// prefix (with or without the display prefix).
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim().to_ascii_lowercase();
                let stripped = identifier
                    .strip_prefix($display_prefix)
                    .unwrap_or(identifier.as_str());
                !stripped.is_empty() && self.0.to_string().starts_with(stripped)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Ok(uuid) = Uuid::parse_str(s) {
                    return Ok(Self(uuid));
                }
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(MealId, "meal-");
define_id!(WorkoutId, "wkt-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_differ() {
        let mut ids = RandomIdGenerator;
        let a = MealId::generate(&mut ids);
        let b = MealId::generate(&mut ids);
        assert_ne!(a, b);
        assert!(!a.as_uuid().is_nil());
    }

    #[test]
    fn test_sequential_ids_are_deterministic() {
        let mut first = SequentialIdGenerator::default();
        let mut second = SequentialIdGenerator::default();
        assert_eq!(MealId::generate(&mut first), MealId::generate(&mut second));
        assert_eq!(
            MealId::generate(&mut first).as_uuid(),
            &Uuid::from_u128(2)
        );
    }

    #[test]
    fn test_id_display() {
        let id = WorkoutId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap());
        assert_eq!(id.to_string(), "wkt-550e8400");
    }

    #[test]
    fn test_id_serialization_is_plain_uuid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = MealId::parse(uuid_str).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
        let deserialized: MealId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_matches_accepts_prefixes() {
        let id = MealId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("meal-550e8400"));
        assert!(id.matches("550E"));
        assert!(!id.matches("meal-"));
        assert!(!id.matches("660e"));
    }

    #[test]
    fn test_from_str_strips_prefix() {
        let parsed: MealId = "meal-550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            parsed.as_uuid().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }
}
