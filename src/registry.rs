use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

// The four fixed panel zones.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ZoneId {
    Front = 0,
    Back = 1,
    Right = 2,
    Left = 3,
}

impl ZoneId {
    pub const ALL: [ZoneId; 4] = [ZoneId::Front, ZoneId::Back, ZoneId::Right, ZoneId::Left];

    fn idx(self) -> usize {
        self as usize
    }
}

// How the zone is displayed in the UI and in notices
impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ZoneId::Front => write!(f, "front"),
            ZoneId::Back => write!(f, "back"),
            ZoneId::Right => write!(f, "right"),
            ZoneId::Left => write!(f, "left"),
        }
    }
}

// Per-zone settings saved to the config file
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneConfig {
    pub time: u16,  // activation duration, in base units
    pub order: u16, // visitation rank, intended unique across zones
}

// Wrapper for the fixed zone->settings table to implement Default and Indexing
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneTable {
    data: [ZoneConfig; 4],
}

// Factory settings, also the recovery target when orders collide.
pub const DEFAULT_ZONES: ZoneTable = ZoneTable {
    data: [
        ZoneConfig { time: 1, order: 1 }, // front
        ZoneConfig { time: 1, order: 2 }, // back
        ZoneConfig { time: 1, order: 3 }, // right
        ZoneConfig { time: 1, order: 4 }, // left
    ],
};

impl Default for ZoneTable {
    fn default() -> Self {
        DEFAULT_ZONES
    }
}

// Allow indexing like `table[ZoneId::Front]`
impl Index<ZoneId> for ZoneTable {
    type Output = ZoneConfig;

    fn index(&self, zone: ZoneId) -> &ZoneConfig {
        &self.data[zone.idx()]
    }
}

impl IndexMut<ZoneId> for ZoneTable {
    fn index_mut(&mut self, zone: ZoneId) -> &mut ZoneConfig {
        &mut self.data[zone.idx()]
    }
}

/// Reported when two or more zones share an `order` value. Carries the
/// conflicting zones grouped by the order they collided on, in ascending
/// order of that value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConflict {
    pub groups: Vec<Vec<ZoneId>>,
}

// The user-facing listing, e.g. "front, back and right, left"
impl std::fmt::Display for OrderConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let listed = self
            .groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect::<Vec<_>>()
            .join(" and ");
        write!(f, "The following zones have the same order: {}", listed)
    }
}

/// Holds the live configuration for all four zones. Zones are never created
/// or destroyed, only overwritten; resets always go back to `DEFAULT_ZONES`,
/// never to whatever was loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRegistry {
    zones: ZoneTable,
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self {
            zones: DEFAULT_ZONES,
        }
    }
}

impl ZoneRegistry {
    pub fn from_table(zones: ZoneTable) -> Self {
        Self { zones }
    }

    /// Snapshot of the current table, for saving back into the config file.
    pub fn table(&self) -> ZoneTable {
        self.zones
    }

    pub fn get(&self, zone: ZoneId) -> ZoneConfig {
        self.zones[zone]
    }

    /// Overwrites a zone's settings with caller-supplied values. Range
    /// validation is a UI concern; duplicate orders are caught later by
    /// `check_unique_orders`.
    pub fn save(&mut self, zone: ZoneId, time: u16, order: u16) {
        self.zones[zone] = ZoneConfig { time, order };
        log::debug!("Zone {} updated: {:?}", zone, self.zones[zone]);
    }

    /// Verifies that no two zones share an `order` value. On any collision
    /// every zone is reset to factory settings (all-or-nothing; partial
    /// repair is not attempted) and the conflicting groups are returned so
    /// the UI can name them.
    pub fn check_unique_orders(&mut self) -> Result<(), OrderConflict> {
        let mut by_order: BTreeMap<u16, Vec<ZoneId>> = BTreeMap::new();
        for zone in ZoneId::ALL {
            by_order.entry(self.zones[zone].order).or_default().push(zone);
        }

        let groups: Vec<Vec<ZoneId>> = by_order
            .into_values()
            .filter(|group| group.len() > 1)
            .collect();

        if groups.is_empty() {
            return Ok(());
        }

        let conflict = OrderConflict { groups };
        warn!("{}. Resetting all zones to default values.", conflict);
        self.reset_to_default();
        Err(conflict)
    }

    /// Unconditionally restores every zone to factory settings.
    pub fn reset_to_default(&mut self) {
        self.zones = DEFAULT_ZONES;
        info!("All zones reset to default values: {:?}", self.zones);
    }
}
