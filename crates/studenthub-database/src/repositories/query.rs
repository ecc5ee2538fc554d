//! Translation of the declarative [`SearchFilter`] into SQL.
//!
//! Every repository starts its list queries from a `WHERE deleted_at IS
//! NULL` base and appends the filter through [`push_filter`], so the
//! soft-delete scope and the search conditions compose the same way in
//! every entity module. Column names in the filter come from repository
//! code, never from user input; only values are bound.

use sqlx::{Postgres, QueryBuilder};

use studenthub_core::types::filter::{MatchValue, SearchFilter};

/// Append the filter's conditions to a query builder.
///
/// Produces ` AND (col1 ILIKE $n OR col2 ILIKE $n+1 ...)` for the keyword
/// clause and ` AND col = $m` for each exact match. A filter with no
/// active conditions appends nothing.
pub(crate) fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &SearchFilter) {
    if filter.has_keyword() {
        let keyword = filter.keyword.as_deref().unwrap_or("").trim();
        let pattern = format!("%{keyword}%");
        qb.push(" AND (");
        {
            let mut clause = qb.separated(" OR ");
            for column in &filter.keyword_columns {
                clause.push(format!("{column} ILIKE "));
                clause.push_bind_unseparated(pattern.clone());
            }
        }
        qb.push(")");
    }

    for m in &filter.exact {
        qb.push(format!(" AND {} = ", m.column));
        match &m.value {
            MatchValue::String(v) => qb.push_bind(v.clone()),
            MatchValue::Integer(v) => qb.push_bind(*v),
            MatchValue::Uuid(v) => qb.push_bind(*v),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT * FROM students WHERE deleted_at IS NULL")
    }

    #[test]
    fn test_empty_filter_appends_nothing() {
        let mut qb = base();
        push_filter(&mut qb, &SearchFilter::new());
        assert_eq!(qb.sql(), "SELECT * FROM students WHERE deleted_at IS NULL");
    }

    #[test]
    fn test_keyword_or_clause() {
        let mut qb = base();
        let filter = SearchFilter::new().keyword("nguyen", &["code", "full_name", "email"]);
        push_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM students WHERE deleted_at IS NULL \
             AND (code ILIKE $1 OR full_name ILIKE $2 OR email ILIKE $3)"
        );
    }

    #[test]
    fn test_keyword_and_exact_compose() {
        let mut qb = base();
        let filter = SearchFilter::new()
            .keyword("an", &["full_name"])
            .exact_str("faculty_id", "f-1")
            .exact_int("cohort_year", 2024);
        push_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM students WHERE deleted_at IS NULL \
             AND (full_name ILIKE $1) AND faculty_id = $2 AND cohort_year = $3"
        );
    }

    #[test]
    fn test_blank_keyword_skipped() {
        let mut qb = base();
        let filter = SearchFilter::new()
            .keyword("   ", &["full_name"])
            .exact_int("cohort_year", 2023);
        push_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM students WHERE deleted_at IS NULL AND cohort_year = $1"
        );
    }
}
