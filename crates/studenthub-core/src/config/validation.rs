//! Business validation configuration.

use serde::{Deserialize, Serialize};

/// Configurable validation rules applied by the services at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Email domains accepted for student emails. Empty = any domain.
    #[serde(default)]
    pub allowed_email_domains: Vec<String>,
    /// Regular expression a student phone number must match.
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allowed_email_domains: Vec::new(),
            phone_pattern: default_phone_pattern(),
        }
    }
}

fn default_phone_pattern() -> String {
    // Vietnamese mobile numbers: 0xxxxxxxxx or +84xxxxxxxxx.
    r"^(\+84|0)\d{9}$".to_string()
}
