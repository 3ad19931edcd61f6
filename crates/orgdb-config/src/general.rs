//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

/// Actor recorded when no `--actor` is given.
fn default_actor() -> String {
    "anonymous".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Identity written to `createdBy`/`updatedBy` and `changedBy`.
    #[serde(default = "default_actor")]
    pub default_actor: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_actor: default_actor(),
        }
    }
}
