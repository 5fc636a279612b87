use crate::registry::ZoneTable;
use serde::{Deserialize, Serialize};

// Configuration data saved to JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(default)] // Fall back to factory settings if missing in JSON
    pub zones: ZoneTable,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            zones: ZoneTable::default(),
        }
    }
}
