//! Calendar layout configuration.

use lather_core::calendar::{parse_weekday, CalendarOptions, GridSize};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_first_weekday() -> String {
    String::from("sunday")
}

const fn default_grid_weeks() -> u32 {
    6
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Weekday in the leftmost column (e.g., "sunday", "mon").
    #[serde(default = "default_first_weekday")]
    pub first_weekday: String,

    /// Month grid height: 5 (35 cells, truncating) or 6 (42 cells).
    #[serde(default = "default_grid_weeks")]
    pub grid_weeks: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: default_first_weekday(),
            grid_weeks: default_grid_weeks(),
        }
    }
}

impl CalendarConfig {
    /// Resolve into typed layout options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown weekday or a
    /// grid height other than 5 or 6.
    pub fn options(&self) -> Result<CalendarOptions, ConfigError> {
        let first_weekday = parse_weekday(&self.first_weekday)
            .map_err(|e| ConfigError::invalid("calendar.first_weekday", e.to_string()))?;
        let grid_size = GridSize::from_weeks(self.grid_weeks)
            .map_err(|e| ConfigError::invalid("calendar.grid_weeks", e.to_string()))?;
        Ok(CalendarOptions {
            first_weekday,
            grid_size,
        })
    }
}
