//! Barcode category and sequence counter models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Subject kind of an issued barcode. Each category owns its own persisted
/// counter row and prefix; the set is closed and never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BarcodeCategory {
    Book,
    Location,
}

impl BarcodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeCategory::Book => "book",
            BarcodeCategory::Location => "location",
        }
    }
}

impl fmt::Display for BarcodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(BarcodeCategory::Book),
            "location" => Ok(BarcodeCategory::Location),
            other => Err(AppError::Validation(format!(
                "unknown barcode category '{}'",
                other
            ))),
        }
    }
}

/// Persisted counter row for one barcode category.
///
/// `last_value` is non-decreasing; issuance attempts that are later
/// discarded still consume a value, so gaps are expected and reuse never
/// happens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BarcodeSequence {
    pub category: BarcodeCategory,
    pub prefix: i16,
    pub last_value: i64,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative request to rotate or describe a category prefix
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPrefixRequest {
    pub prefix: u16,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!("book".parse::<BarcodeCategory>().unwrap(), BarcodeCategory::Book);
        assert_eq!(
            "location".parse::<BarcodeCategory>().unwrap(),
            BarcodeCategory::Location
        );
        assert!("shelf".parse::<BarcodeCategory>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for category in [BarcodeCategory::Book, BarcodeCategory::Location] {
            assert_eq!(category.to_string().parse::<BarcodeCategory>().unwrap(), category);
        }
    }
}
