//! Storage location model and the four-level containment type system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Physical containment levels, ordered: a location type is a valid child
/// of another iff its level is exactly one below the parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LocationType {
    Building,
    Room,
    Cabinet,
    Shelf,
}

impl LocationType {
    /// Depth in the containment hierarchy, 1 (building) to 4 (shelf).
    pub fn level(&self) -> i16 {
        match self {
            LocationType::Building => 1,
            LocationType::Room => 2,
            LocationType::Cabinet => 3,
            LocationType::Shelf => 4,
        }
    }

    pub fn is_child_of(&self, parent: LocationType) -> bool {
        self.level() == parent.level() + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Building => "building",
            LocationType::Room => "room",
            LocationType::Cabinet => "cabinet",
            LocationType::Shelf => "shelf",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = AppError;

    /// Boundary parsing: transport layers carry the type as an open string,
    /// rejected here before it can reach the hierarchy validator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "building" => Ok(LocationType::Building),
            "room" => Ok(LocationType::Room),
            "cabinet" => Ok(LocationType::Cabinet),
            "shelf" => Ok(LocationType::Shelf),
            other => Err(AppError::InvalidLocationType(format!(
                "unknown location type '{}'",
                other
            ))),
        }
    }
}

/// A storage location. Invariants enforced before persistence:
/// a building has no parent and a non-empty address; every other location
/// has exactly one parent whose type is one level above its own.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    /// Issued EAN-13, unique across locations
    pub barcode: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create location request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    pub parent_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// Update location request; only supplied fields change. A new `parent_id`
/// triggers re-parent validation against the hierarchy.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert_eq!(LocationType::Building.level(), 1);
        assert_eq!(LocationType::Room.level(), 2);
        assert_eq!(LocationType::Cabinet.level(), 3);
        assert_eq!(LocationType::Shelf.level(), 4);
    }

    #[test]
    fn test_is_child_of_adjacent_levels_only() {
        assert!(LocationType::Room.is_child_of(LocationType::Building));
        assert!(LocationType::Cabinet.is_child_of(LocationType::Room));
        assert!(LocationType::Shelf.is_child_of(LocationType::Cabinet));

        assert!(!LocationType::Cabinet.is_child_of(LocationType::Building));
        assert!(!LocationType::Shelf.is_child_of(LocationType::Room));
        assert!(!LocationType::Building.is_child_of(LocationType::Shelf));
        assert!(!LocationType::Room.is_child_of(LocationType::Room));
        assert!(!LocationType::Building.is_child_of(LocationType::Building));
    }

    #[test]
    fn test_parse_location_type() {
        assert_eq!("shelf".parse::<LocationType>().unwrap(), LocationType::Shelf);
        assert!("warehouse".parse::<LocationType>().is_err());
        assert!("Building".parse::<LocationType>().is_err());
    }
}
