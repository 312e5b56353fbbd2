//! Upload size limits for photos sent to the vision endpoint.

use serde::{Deserialize, Serialize};

const fn default_max_dimension() -> u32 {
    1024
}

/// 4 MiB, below the endpoint's 5 MB request ceiling.
const fn default_max_bytes() -> usize {
    4 * 1024 * 1024
}

const fn default_initial_quality() -> u8 {
    80
}

const fn default_quality_step() -> u8 {
    10
}

const fn default_min_quality() -> u8 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Longest side, in pixels, after downscaling.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Byte budget for the encoded JPEG.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// First JPEG quality tried, in percent.
    #[serde(default = "default_initial_quality")]
    pub initial_quality: u8,

    /// Quality decrement per attempt.
    #[serde(default = "default_quality_step")]
    pub quality_step: u8,

    /// Quality floor. Reaching it ends the search even if still over budget.
    #[serde(default = "default_min_quality")]
    pub min_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            max_bytes: default_max_bytes(),
            initial_quality: default_initial_quality(),
            quality_step: default_quality_step(),
            min_quality: default_min_quality(),
        }
    }
}
