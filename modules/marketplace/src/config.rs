use serde::{Deserialize, Serialize};

/// Configuration for the marketplace module (`modules.marketplace`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// Insert the demonstration catalog when no projects are stored.
    #[serde(default = "default_seed_demo_projects")]
    pub seed_demo_projects: bool,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    #[serde(default = "default_max_skill_length")]
    pub max_skill_length: usize,
    #[serde(default = "default_max_avatar_bytes")]
    pub max_avatar_bytes: usize,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            seed_demo_projects: default_seed_demo_projects(),
            max_name_length: default_max_name_length(),
            max_skill_length: default_max_skill_length(),
            max_avatar_bytes: default_max_avatar_bytes(),
        }
    }
}

fn default_seed_demo_projects() -> bool {
    true
}

fn default_max_name_length() -> usize {
    100
}

fn default_max_skill_length() -> usize {
    50
}

fn default_max_avatar_bytes() -> usize {
    512 * 1024
}
