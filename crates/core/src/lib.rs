pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Once;

use models::{
    expense::{Expense, ExpenseSortOrder},
    ledger::Ledger,
    trip::Trip,
};
use providers::{gemini::GeminiProvider, traits::TextProvider};
use services::{
    assistant_service::{AssistantService, TripSnapshot},
    ledger_service::LedgerService,
};
use storage::manager::StorageManager;
use uuid::Uuid;

use errors::CoreError;

static INIT_TRACING: Once = Once::new();

/// Initializes a global tracing subscriber with sensible defaults
/// (`RUST_LOG` respected, `travel_tracker_core=info` otherwise).
/// Safe to call repeatedly; only the first call installs anything.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("travel_tracker_core=info"));

        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Main entry point for the Travel Tracker core library.
/// Holds the ledger state, the persistent store, the API credential, and
/// the services needed to operate on them.
///
/// Mutations apply in memory first and then persist the snapshot; a failed
/// write surfaces as `Err` while the in-memory state stays applied and
/// `has_unsaved_changes()` stays `true`, so `save()` can retry.
#[must_use]
pub struct TravelTracker {
    ledger: Ledger,
    credential: Option<String>,
    ledger_service: LedgerService,
    assistant_service: AssistantService,
    storage: StorageManager,
    /// Tracks whether any ledger mutation is not yet on disk.
    dirty: bool,
}

impl std::fmt::Debug for TravelTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelTracker")
            .field("trips", &self.ledger.trips.len())
            .field("current_trip", &self.ledger.current_trip().name)
            .field("credential", &self.credential.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl TravelTracker {
    /// Start the tracker from whatever the store holds.
    ///
    /// Missing, empty, or malformed records never block startup: the trip
    /// snapshot falls back to the default trip ("My First Trip", budget
    /// 2000), a stale current id falls back to the first trip, and an
    /// unreadable credential is treated as absent. A synthesized ledger is
    /// persisted immediately; if even that write fails, the tracker starts
    /// anyway with `has_unsaved_changes()` set.
    pub fn initialize(storage: StorageManager) -> Self {
        let loaded = match storage.load_trips() {
            Ok(trips) => trips,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt trip snapshot, resetting to default");
                None
            }
        };
        let current = match storage.load_current_trip_id() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "corrupt current-trip record, using first trip");
                None
            }
        };
        let credential = match storage.load_credential() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable credential record, treating as absent");
                None
            }
        };

        let had_snapshot = matches!(&loaded, Some(trips) if !trips.is_empty());
        let ledger = Ledger::new(loaded.unwrap_or_default(), current);

        let mut tracker = Self::build(ledger, credential, storage);
        if !had_snapshot {
            tracker.dirty = true;
            if let Err(e) = tracker.save() {
                tracing::warn!(error = %e, "could not persist initial ledger");
            }
        }
        tracker
    }

    /// `initialize` against the platform data directory.
    pub fn with_default_storage() -> Result<Self, CoreError> {
        Ok(Self::initialize(StorageManager::with_default_dir()?))
    }

    /// Write the full ledger snapshot (trips + current id) to the store.
    /// Clears the unsaved-changes flag on success.
    pub fn save(&mut self) -> Result<(), CoreError> {
        self.storage.save_trips(&self.ledger.trips)?;
        self.storage.save_current_trip_id(self.ledger.current_trip_id)?;
        self.dirty = false;
        Ok(())
    }

    /// Returns `true` if a ledger mutation has not yet reached the store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Trip Management ─────────────────────────────────────────────

    /// The currently selected trip.
    /// Self-healing: a stale current id falls back to the first trip.
    #[must_use]
    pub fn current_trip(&self) -> &Trip {
        self.ledger.current_trip()
    }

    /// Id of the currently selected trip.
    #[must_use]
    pub fn current_trip_id(&self) -> Uuid {
        self.ledger.current_trip_id
    }

    /// All trips, in creation order.
    #[must_use]
    pub fn get_trips(&self) -> &[Trip] {
        &self.ledger.trips
    }

    /// Get a single trip by its id.
    #[must_use]
    pub fn get_trip(&self, trip_id: Uuid) -> Option<&Trip> {
        self.ledger.trip_by_id(trip_id)
    }

    /// Number of trips in the ledger (always at least one).
    #[must_use]
    pub fn trip_count(&self) -> usize {
        self.ledger.trips.len()
    }

    /// Create a trip from raw form input, make it current, and persist.
    ///
    /// `name` must be non-empty after trimming and `budget` must parse to a
    /// finite number; violations are rejected with nothing created and
    /// nothing written.
    pub fn create_trip(&mut self, name: &str, budget: &str) -> Result<Uuid, CoreError> {
        let id = self
            .ledger_service
            .create_trip(&mut self.ledger, name, budget)?;
        self.dirty = true;
        self.save()?;
        Ok(id)
    }

    /// Make an existing trip current and persist the selection.
    pub fn select_trip(&mut self, trip_id: Uuid) -> Result<(), CoreError> {
        self.ledger_service.select_trip(&mut self.ledger, trip_id)?;
        self.dirty = true;
        self.save()?;
        Ok(())
    }

    // ── Expense Management ──────────────────────────────────────────

    /// Add an expense to the current trip from raw form input and persist.
    ///
    /// `amount` must parse to a finite number; `title`, `category`, and
    /// `date` are accepted as given (unknown categories become `Other`).
    /// The expense is prepended: newest entry first, regardless of date.
    pub fn add_expense(
        &mut self,
        title: &str,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Result<Uuid, CoreError> {
        let id = self
            .ledger_service
            .add_expense(&mut self.ledger, title, amount, category, date)?;
        self.dirty = true;
        self.save()?;
        Ok(id)
    }

    /// Delete an expense from the current trip by id.
    ///
    /// Returns whether anything was removed. An unknown id is a benign
    /// no-op (`Ok(false)`) with no write. Callable unconditionally; asking
    /// the user for confirmation first is the caller's concern.
    pub fn delete_expense(&mut self, expense_id: Uuid) -> Result<bool, CoreError> {
        let removed = self
            .ledger_service
            .delete_expense(&mut self.ledger, expense_id);
        if removed {
            self.dirty = true;
            self.save()?;
        }
        Ok(removed)
    }

    /// Number of expenses on the current trip.
    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.current_trip().expenses.len()
    }

    /// The most recently added expenses of the current trip, newest first.
    /// Returns fewer than `count` when the trip has fewer expenses.
    #[must_use]
    pub fn get_recent_expenses(&self, count: usize) -> &[Expense] {
        let expenses = &self.current_trip().expenses;
        &expenses[..count.min(expenses.len())]
    }

    /// Expenses of the current trip in a specific order.
    /// Date orders compare the stored ISO strings; the stored sequence
    /// itself always stays in insertion order.
    #[must_use]
    pub fn get_expenses_sorted(&self, order: ExpenseSortOrder) -> Vec<Expense> {
        self.ledger_service
            .expenses_sorted(self.current_trip(), order)
    }

    // ── Totals ──────────────────────────────────────────────────────

    /// Sum of all expense amounts on the current trip.
    #[must_use]
    pub fn total_spent(&self) -> f64 {
        self.ledger_service.total_spent(self.current_trip())
    }

    /// Budget minus total spent for the current trip. Negative when the
    /// trip is over budget; that is a display signal, not an error.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.ledger_service.remaining(self.current_trip())
    }

    /// Whether the current trip has spent past its budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining() < 0.0
    }

    // ── Assistant ───────────────────────────────────────────────────

    /// Whether an API credential is stored.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Store a trimmed, non-empty API credential and (re)build the Gemini
    /// provider so it takes effect immediately. Empty or whitespace-only
    /// input is rejected with no state change.
    ///
    /// On persistence failure the in-memory credential stays active for
    /// this session; call again to retry the write.
    pub fn set_credential(&mut self, key: &str) -> Result<(), CoreError> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(CoreError::ValidationError(
                "Credential must not be empty".into(),
            ));
        }
        self.credential = Some(trimmed.to_string());
        self.assistant_service
            .set_provider(Box::new(GeminiProvider::new(trimmed)));
        self.storage.save_credential(trimmed)?;
        Ok(())
    }

    /// Remove the stored credential and deconfigure the assistant.
    /// Returns whether a persisted credential existed.
    pub fn clear_credential(&mut self) -> Result<bool, CoreError> {
        self.credential = None;
        self.assistant_service.clear_provider();
        self.storage.clear_credential()
    }

    /// Swap in an alternate text provider (different endpoint, or a test
    /// double). The stored credential is left untouched.
    pub fn set_assistant_provider(&mut self, provider: Box<dyn TextProvider>) {
        self.assistant_service.set_provider(provider);
    }

    /// Name of the configured assistant provider, if any.
    #[must_use]
    pub fn assistant_provider_name(&self) -> Option<&str> {
        self.assistant_service.provider_name()
    }

    /// Ask the assistant one question about the current trip.
    ///
    /// Sends the current trip's `{tripName, budget, expenses}` snapshot,
    /// read at call time, plus the question in a single request. Fails
    /// with `CredentialMissing` before any network activity when no
    /// provider is configured. Holds no conversation state.
    pub async fn ask(&self, question: &str) -> Result<String, CoreError> {
        let snapshot = TripSnapshot::from(self.ledger.current_trip());
        self.assistant_service.ask(question, &snapshot).await
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export the full ledger as a JSON string (for debugging/backup).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Export the current trip's expenses as a CSV string.
    /// Columns: id, title, amount, category, date
    #[must_use]
    pub fn export_expenses_to_csv(&self) -> String {
        let mut csv = String::from("id,title,amount,category,date\n");
        for expense in &self.current_trip().expenses {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                expense.id,
                escape_csv_field(&expense.title),
                expense.amount,
                expense.category.as_str(),
                escape_csv_field(&expense.date),
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger, credential: Option<String>, storage: StorageManager) -> Self {
        let assistant_service = match credential.as_deref() {
            Some(key) => AssistantService::with_provider(Box::new(GeminiProvider::new(key))),
            None => AssistantService::new(),
        };

        Self {
            ledger,
            credential,
            ledger_service: LedgerService::new(),
            assistant_service,
            storage,
            dirty: false,
        }
    }
}

/// Quote a CSV field when it contains commas, quotes, or newlines.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
