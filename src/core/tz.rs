//! Store → IANA timezone lookup.

use crate::db::queries::TimezoneRow;
use chrono_tz::Tz;
use std::collections::HashMap;

/// Maps a store id to its IANA zone. Resolution never fails: an unmapped
/// store, or a zone string the tz database does not know, yields the
/// configured default zone.
#[derive(Debug, Clone)]
pub struct TimezoneResolver {
    zones: HashMap<String, Tz>,
    default_zone: Tz,
    unrecognized: usize,
}

impl TimezoneResolver {
    pub fn from_rows(rows: &[TimezoneRow], default_zone: Tz) -> Self {
        let mut zones = HashMap::new();
        let mut unrecognized = 0usize;

        for row in rows {
            match row.timezone_str.trim().parse::<Tz>() {
                Ok(tz) => {
                    zones.insert(row.store_id.clone(), tz);
                }
                Err(_) => {
                    // Falls through to the default at resolve time.
                    unrecognized += 1;
                }
            }
        }

        Self {
            zones,
            default_zone,
            unrecognized,
        }
    }

    pub fn with_default(default_zone: Tz) -> Self {
        Self {
            zones: HashMap::new(),
            default_zone,
            unrecognized: 0,
        }
    }

    pub fn resolve(&self, store_id: &str) -> Tz {
        self.zones
            .get(store_id)
            .copied()
            .unwrap_or(self.default_zone)
    }

    /// Mapping rows whose zone string was not a known IANA name.
    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }
}
