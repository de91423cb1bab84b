use serde::{Deserialize, Serialize};

/// Configuration for the vets module (`modules.vets` in the app config).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VetsConfig {
    /// Vets per page in the HTML-style list view.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Load the sample vets and specialties into an empty database on startup.
    #[serde(default)]
    pub seed_sample_data: bool,
}

impl Default for VetsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            seed_sample_data: false,
        }
    }
}

fn default_page_size() -> u64 {
    5
}
