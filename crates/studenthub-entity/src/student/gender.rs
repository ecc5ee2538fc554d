//! Student gender enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender as recorded on the student profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other / not disclosed.
    Other,
}

impl Gender {
    /// Return the gender as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// The Vietnamese display label used in spreadsheet exports.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Male => "Nam",
            Self::Female => "Nữ",
            Self::Other => "Khác",
        }
    }

    /// Parse a spreadsheet cell into a gender, accepting both the display
    /// label and the lowercase code.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "Nam" | "nam" | "male" => Some(Self::Male),
            "Nữ" | "Nu" | "nữ" | "nu" | "female" => Some(Self::Female),
            "Khác" | "Khac" | "khác" | "khac" | "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = studenthub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(studenthub_core::AppError::validation(format!(
                "Invalid gender: '{s}'. Expected one of: male, female, other"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_accepts_display_and_code() {
        assert_eq!(Gender::from_label("Nam"), Some(Gender::Male));
        assert_eq!(Gender::from_label("Nữ"), Some(Gender::Female));
        assert_eq!(Gender::from_label("female"), Some(Gender::Female));
        assert_eq!(Gender::from_label("??"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("MALE".parse::<Gender>().unwrap(), Gender::Male);
        assert!("invalid".parse::<Gender>().is_err());
    }
}
