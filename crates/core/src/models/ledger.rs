use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::trip::Trip;

/// Name of the trip synthesized when no persisted trips exist.
pub const DEFAULT_TRIP_NAME: &str = "My First Trip";

/// Budget of the synthesized default trip.
pub const DEFAULT_TRIP_BUDGET: f64 = 2000.0;

/// The full collection of trips plus the current trip selection.
///
/// **Invariant**: `trips` is never empty. Constructors synthesize the
/// default trip from an empty list, and no operation removes the last trip.
/// `current_trip_id` may go stale (e.g., hand-edited storage); reads heal
/// by falling back to the first trip instead of erroring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ledger {
    /// All trips, in creation order
    pub trips: Vec<Trip>,

    /// Id of the currently selected trip
    pub current_trip_id: Uuid,
}

impl Ledger {
    /// Builds a ledger from persisted parts, enforcing the invariants:
    /// an empty trip list is replaced by the default trip, and a stored
    /// current id matching no trip resolves to the first trip.
    pub fn new(mut trips: Vec<Trip>, current_trip_id: Option<Uuid>) -> Self {
        if trips.is_empty() {
            trips.push(Trip::new(DEFAULT_TRIP_NAME, DEFAULT_TRIP_BUDGET));
        }
        let current_trip_id = current_trip_id
            .filter(|id| trips.iter().any(|t| t.id == *id))
            .unwrap_or(trips[0].id);
        Self {
            trips,
            current_trip_id,
        }
    }

    /// A fresh ledger containing only the default trip.
    pub fn with_default_trip() -> Self {
        Self::new(Vec::new(), None)
    }

    /// The currently selected trip.
    ///
    /// Self-healing read: a current id matching no trip falls back to the
    /// first trip without raising an error or writing anything back.
    pub fn current_trip(&self) -> &Trip {
        self.trips
            .iter()
            .find(|t| t.id == self.current_trip_id)
            .unwrap_or(&self.trips[0])
    }

    /// Mutable access to the currently selected trip (same fallback rule).
    pub fn current_trip_mut(&mut self) -> &mut Trip {
        let idx = self
            .trips
            .iter()
            .position(|t| t.id == self.current_trip_id)
            .unwrap_or(0);
        &mut self.trips[idx]
    }

    /// Looks up a trip by id.
    pub fn trip_by_id(&self, id: Uuid) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id == id)
    }

    /// Whether a trip with this id exists.
    pub fn contains_trip(&self, id: Uuid) -> bool {
        self.trips.iter().any(|t| t.id == id)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_default_trip()
    }
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Stored or hand-edited data goes through `new`, so an empty trip
        // list or an unknown current id can never construct a ledger that
        // violates the invariants above.
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            trips: Vec<Trip>,
            #[serde(default)]
            current_trip_id: Option<Uuid>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Ledger::new(raw.trips, raw.current_trip_id))
    }
}
