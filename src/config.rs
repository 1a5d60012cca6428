use std::path::PathBuf;

pub const EXPORT_DIR_VAR: &str = "EXTRACTION_EXPORT_DIR";

const DEFAULT_DOCUMENT_NAME: &str = "document.pdf";
const DEFAULT_ATTRIBUTES_NAME: &str = "attributes.xlsx";

/// Settings for report formatting and export.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterConfig {
    /// Directory for exports written under a generated name.
    pub export_dir: PathBuf,
    pub default_document_name: String,
    pub default_attributes_name: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            default_document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            default_attributes_name: DEFAULT_ATTRIBUTES_NAME.to_string(),
        }
    }
}

impl FormatterConfig {
    /// Defaults overridden from the environment. A `.env` in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();
        if let Ok(dir) = std::env::var(EXPORT_DIR_VAR) {
            if !dir.trim().is_empty() {
                config.export_dir = PathBuf::from(dir.trim());
            }
        }
        config
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }
}
