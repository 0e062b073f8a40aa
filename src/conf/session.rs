use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Rows shown in the summary preview.
    #[serde(default = "SessionConfig::default_preview_rows")]
    pub preview_rows: usize,
    /// Rows scanned when inferring CSV column types, all rows when unset.
    #[serde(default)]
    pub schema_inference_rows: Option<usize>,
}

impl SessionConfig {
    fn default_preview_rows() -> usize {
        10
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_rows: Self::default_preview_rows(),
            schema_inference_rows: None,
        }
    }
}
