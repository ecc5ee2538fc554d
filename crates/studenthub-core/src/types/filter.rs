//! Declarative search filter for list queries.
//!
//! A [`SearchFilter`] describes the optional conditions a list endpoint
//! accepts: one keyword matched case-insensitively as a substring across a
//! set of text columns, plus independent exact-match conditions. It is
//! purely declarative; the database crate translates it into SQL. The
//! soft-delete scope is not part of the filter; repositories always apply
//! it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An exact-match condition on a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactMatch {
    /// Column name. Always a code-supplied identifier, never user input.
    pub column: String,
    /// Value to compare against.
    pub value: MatchValue,
}

/// Value of an exact-match condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    /// A string value (enum codes).
    String(String),
    /// An integer value (years, semesters).
    Integer(i64),
    /// A UUID value (reference columns).
    Uuid(Uuid),
}

/// Composed filter over an entity's active records.
///
/// Semantics: `(keyword OR-match over keyword_columns) AND exact[0] AND
/// exact[1] AND ...`. An empty keyword or an empty column list disables the
/// keyword clause entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Keyword for case-insensitive substring search.
    pub keyword: Option<String>,
    /// Text columns the keyword is matched against.
    pub keyword_columns: Vec<String>,
    /// Independent exact-match conditions, ANDed in.
    pub exact: Vec<ExactMatch>,
}

impl SearchFilter {
    /// Create an empty filter (active-records scope only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword and the columns it searches.
    pub fn keyword(mut self, keyword: impl Into<String>, columns: &[&str]) -> Self {
        self.keyword = Some(keyword.into());
        self.keyword_columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Add an exact string match on a column.
    pub fn exact_str(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.exact.push(ExactMatch {
            column: column.into(),
            value: MatchValue::String(value.into()),
        });
        self
    }

    /// Add an exact integer match on a column.
    pub fn exact_int(mut self, column: impl Into<String>, value: i64) -> Self {
        self.exact.push(ExactMatch {
            column: column.into(),
            value: MatchValue::Integer(value),
        });
        self
    }

    /// Add an exact UUID match on a reference column.
    pub fn exact_uuid(mut self, column: impl Into<String>, value: Uuid) -> Self {
        self.exact.push(ExactMatch {
            column: column.into(),
            value: MatchValue::Uuid(value),
        });
        self
    }

    /// Whether the keyword clause is active.
    pub fn has_keyword(&self) -> bool {
        self.keyword.as_deref().is_some_and(|k| !k.trim().is_empty())
            && !self.keyword_columns.is_empty()
    }

    /// Whether the filter adds any condition beyond the active scope.
    pub fn is_empty(&self) -> bool {
        !self.has_keyword() && self.exact.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_disables_clause() {
        let filter = SearchFilter::new().keyword("  ", &["full_name"]);
        assert!(!filter.has_keyword());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_keyword_without_columns_disabled() {
        let filter = SearchFilter {
            keyword: Some("nguyen".to_string()),
            ..Default::default()
        };
        assert!(!filter.has_keyword());
    }

    #[test]
    fn test_composed_filter() {
        let filter = SearchFilter::new()
            .keyword("nguyen", &["code", "full_name"])
            .exact_str("faculty_id", "abc")
            .exact_int("cohort_year", 2024);
        assert!(filter.has_keyword());
        assert_eq!(filter.exact.len(), 2);
    }
}
