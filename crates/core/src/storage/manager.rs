use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::trip::Trip;

const TRIPS_FILE: &str = "trips.json";
const STATE_FILE: &str = "state.json";
const CREDENTIAL_FILE: &str = "credential";
const TMP_SUFFIX: &str = "tmp";

/// Current-selection record persisted alongside the trip snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    current_trip_id: Option<Uuid>,
}

/// File-backed store for the three persisted records: the trip snapshot
/// (`trips.json`), the current-trip selection (`state.json`), and the API
/// credential (`credential`, raw text).
///
/// Every write goes through a temp file plus rename, so a reader never
/// observes a torn record. If multiple processes share the directory, the
/// policy is last-writer-wins on whole records.
pub struct StorageManager {
    dir: PathBuf,
}

impl StorageManager {
    /// A store rooted at the given directory. The directory is created on
    /// first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A store under the platform data directory
    /// (e.g. `~/.local/share/travel-tracker` on Linux).
    pub fn with_default_dir() -> Result<Self, CoreError> {
        let base = dirs::data_dir()
            .ok_or_else(|| CoreError::FileIO("No platform data directory available".to_string()))?;
        Ok(Self::new(base.join("travel-tracker")))
    }

    /// Directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Trip snapshot ───────────────────────────────────────────────

    /// Loads the persisted trip sequence. `Ok(None)` when no snapshot
    /// exists; malformed JSON is an error for the caller to resolve.
    pub fn load_trips(&self) -> Result<Option<Vec<Trip>>, CoreError> {
        let path = self.trips_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let trips: Vec<Trip> = serde_json::from_str(&data)?;
        Ok(Some(trips))
    }

    /// Writes the full trip sequence as pretty-printed JSON.
    pub fn save_trips(&self, trips: &[Trip]) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(trips)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize trips: {e}")))?;
        self.write_atomic(&self.trips_path(), &json)
    }

    // ── Current-trip record ─────────────────────────────────────────

    /// Loads the stored current-trip id. `Ok(None)` when the record is
    /// absent; resolving a stale id is the caller's concern.
    pub fn load_current_trip_id(&self) -> Result<Option<Uuid>, CoreError> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        let state: StoreState = serde_json::from_str(&data)?;
        Ok(state.current_trip_id)
    }

    pub fn save_current_trip_id(&self, id: Uuid) -> Result<(), CoreError> {
        let state = StoreState {
            current_trip_id: Some(id),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize state: {e}")))?;
        self.write_atomic(&self.state_path(), &json)
    }

    // ── Credential record ───────────────────────────────────────────

    /// Loads the stored credential, trimmed. `Ok(None)` when the record is
    /// absent or holds only whitespace.
    pub fn load_credential(&self) -> Result<Option<String>, CoreError> {
        let path = self.credential_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    pub fn save_credential(&self, key: &str) -> Result<(), CoreError> {
        self.write_atomic(&self.credential_path(), key.trim())
    }

    /// Removes the stored credential. Returns whether a record existed.
    pub fn clear_credential(&self) -> Result<bool, CoreError> {
        let path = self.credential_path();
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ── Internal ────────────────────────────────────────────────────

    fn trips_path(&self) -> PathBuf {
        self.dir.join(TRIPS_FILE)
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    fn credential_path(&self) -> PathBuf {
        self.dir.join(CREDENTIAL_FILE)
    }

    /// Write to `<file>.tmp`, flush, then rename over the target.
    fn write_atomic(&self, path: &Path, data: &str) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(path);
        let mut file = File::create(&tmp)?;
        file.write_all(data.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
