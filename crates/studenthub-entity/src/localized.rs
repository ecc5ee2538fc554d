//! Bilingual display names.

use serde::{Deserialize, Serialize};

/// A Vietnamese/English display name pair, stored as JSONB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    /// Vietnamese name.
    pub vi: String,
    /// English name.
    pub en: String,
}

impl LocalizedName {
    /// Create a new name pair.
    pub fn new(vi: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            vi: vi.into(),
            en: en.into(),
        }
    }

    /// The display form used in exports and logs (Vietnamese).
    pub fn display(&self) -> &str {
        &self.vi
    }
}
