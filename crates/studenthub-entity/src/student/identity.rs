//! Identity document sum type.
//!
//! The document shape depends on its kind, so it is modeled as a tagged
//! union discriminated by the `type` field rather than one loosely-typed
//! object with optional fields. Stored as JSONB on the student row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An identity document held by a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityDocument {
    /// Old-format national identity card (CMND).
    Cmnd {
        /// Document number.
        number: String,
        /// Date of issue.
        issued_date: NaiveDate,
        /// Issuing authority/place.
        issued_place: String,
    },
    /// Citizen identity card (CCCD).
    Cccd {
        /// Document number.
        number: String,
        /// Date of issue.
        issued_date: NaiveDate,
        /// Issuing authority/place.
        issued_place: String,
        /// Whether the card carries an embedded chip.
        has_chip: bool,
    },
    /// Passport.
    Passport {
        /// Passport number.
        number: String,
        /// Date of issue.
        issued_date: NaiveDate,
        /// Issuing authority/place.
        issued_place: String,
        /// Issuing country.
        country: String,
        /// Free-form notes.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
}

impl IdentityDocument {
    /// The discriminant label as stored in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cmnd { .. } => "cmnd",
            Self::Cccd { .. } => "cccd",
            Self::Passport { .. } => "passport",
        }
    }

    /// The document number, whatever the kind.
    pub fn number(&self) -> &str {
        match self {
            Self::Cmnd { number, .. }
            | Self::Cccd { number, .. }
            | Self::Passport { number, .. } => number,
        }
    }

    /// Date of issue, whatever the kind.
    pub fn issued_date(&self) -> NaiveDate {
        match self {
            Self::Cmnd { issued_date, .. }
            | Self::Cccd { issued_date, .. }
            | Self::Passport { issued_date, .. } => *issued_date,
        }
    }

    /// Issuing place, whatever the kind.
    pub fn issued_place(&self) -> &str {
        match self {
            Self::Cmnd { issued_place, .. }
            | Self::Cccd { issued_place, .. }
            | Self::Passport { issued_place, .. } => issued_place,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let doc = IdentityDocument::Cccd {
            number: "012345678901".to_string(),
            issued_date: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
            issued_place: "Hà Nội".to_string(),
            has_chip: true,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "cccd");
        assert_eq!(json["has_chip"], true);

        let back: IdentityDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_passport_notes_optional() {
        let json = serde_json::json!({
            "type": "passport",
            "number": "C1234567",
            "issued_date": "2020-01-02",
            "issued_place": "Cục Quản lý xuất nhập cảnh",
            "country": "Việt Nam"
        });
        let doc: IdentityDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.kind(), "passport");
        assert_eq!(doc.number(), "C1234567");
    }
}
