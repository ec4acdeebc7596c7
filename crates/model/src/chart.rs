use serde::{Deserialize, Serialize};

/// Precomputed chart image kept in the object store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartLink {
    #[serde(rename = "chartName")]
    pub chart_name: String,
    /// Object key of the image.
    pub url: String,
    #[serde(default)]
    pub used: i64,
}
