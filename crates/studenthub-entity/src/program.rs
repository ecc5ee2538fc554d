//! Study program entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use crate::localized::LocalizedName;

/// A study program (e.g. standard, high-quality, advanced).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    /// Unique program identifier.
    pub id: Uuid,
    /// Unique program code.
    pub code: String,
    /// Bilingual display name.
    pub name: Json<LocalizedName>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; null means the record is active.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a new program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProgram {
    /// Unique program code.
    pub code: String,
    /// Bilingual display name.
    pub name: LocalizedName,
}

/// Partial update of a program.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProgram {
    /// New program code.
    pub code: Option<String>,
    /// New display name.
    pub name: Option<LocalizedName>,
}

impl UpdateProgram {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none()
    }
}
