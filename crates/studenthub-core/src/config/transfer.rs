//! Import/export configuration.

use serde::{Deserialize, Serialize};

/// Settings for spreadsheet import and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Maximum number of data rows accepted in a single import file.
    #[serde(default = "default_max_rows")]
    pub max_import_rows: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload(),
            max_import_rows: default_max_rows(),
        }
    }
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_max_rows() -> usize {
    10_000
}
