//! Identifier format validation.

use uuid::Uuid;

use studenthub_core::error::AppError;
use studenthub_core::result::AppResult;

/// Parse a path identifier before it reaches the database.
///
/// A malformed id is rejected as a validation error whose message names
/// the entity, so callers can tell "malformed id" apart from
/// "well-formed but absent".
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        AppError::validation(format!("Invalid {entity} id '{raw}': not a well-formed UUID"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use studenthub_core::error::ErrorKind;

    #[test]
    fn test_accepts_canonical_uuid() {
        let id = parse_id("f47ac10b-58cc-4372-a567-0e02b2c3d479", "student").unwrap();
        assert_eq!(id.to_string(), "f47ac10b-58cc-4372-a567-0e02b2c3d479");
    }

    #[test]
    fn test_rejects_malformed_id() {
        let err = parse_id("not-an-id", "student").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("student"));
        assert!(err.message.contains("not-an-id"));
    }
}
