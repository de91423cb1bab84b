use serde::{Deserialize, Serialize};

/// Configuration for the owners module (`modules.owners` in the app config).
///
/// Search results are always paged by five, so the page size is not configurable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnersConfig {
    /// Load the sample owners/pets/visits into an empty database on startup.
    #[serde(default)]
    pub seed_sample_data: bool,
}
