use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::expense::{Category, Expense, ExpenseSortOrder};
use crate::models::ledger::Ledger;
use crate::models::trip::Trip;

/// Manages trips and expenses and calculates derived totals.
///
/// Pure business logic, no I/O and no API calls. Easy to test.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Trips ───────────────────────────────────────────────────────

    /// Create a trip from raw form input and make it current.
    ///
    /// `name` must be non-empty after trimming; `budget` must parse to a
    /// finite number. Violations are rejected before any mutation.
    pub fn create_trip(
        &self,
        ledger: &mut Ledger,
        name: &str,
        budget: &str,
    ) -> Result<Uuid, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::ValidationError(
                "Trip name must not be empty".into(),
            ));
        }
        let budget = parse_finite(budget, "budget")?;

        let trip = Trip::new(name, budget);
        let id = trip.id;
        ledger.trips.push(trip);
        ledger.current_trip_id = id;
        Ok(id)
    }

    /// Make an existing trip current.
    pub fn select_trip(&self, ledger: &mut Ledger, trip_id: Uuid) -> Result<(), CoreError> {
        if !ledger.contains_trip(trip_id) {
            return Err(CoreError::TripNotFound(trip_id.to_string()));
        }
        ledger.current_trip_id = trip_id;
        Ok(())
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Add an expense to the current trip from raw form input.
    ///
    /// `amount` must parse to a finite number; `title`, `category`, and
    /// `date` are accepted as given (unknown categories become `Other`).
    /// The new expense is prepended, so the most recently added entry is
    /// always first regardless of its date.
    pub fn add_expense(
        &self,
        ledger: &mut Ledger,
        title: &str,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Result<Uuid, CoreError> {
        let amount = parse_finite(amount, "amount")?;
        let expense = Expense::new(title, amount, Category::parse(category), date);
        let id = expense.id;
        ledger.current_trip_mut().expenses.insert(0, expense);
        Ok(id)
    }

    /// Remove an expense from the current trip by id.
    ///
    /// Returns whether anything was removed; an unknown id is a benign
    /// no-op, not an error.
    pub fn delete_expense(&self, ledger: &mut Ledger, expense_id: Uuid) -> bool {
        let expenses = &mut ledger.current_trip_mut().expenses;
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        expenses.len() < before
    }

    // ── Derived totals (pure reads) ─────────────────────────────────

    /// Sum of all expense amounts in the trip.
    pub fn total_spent(&self, trip: &Trip) -> f64 {
        trip.expenses.iter().map(|e| e.amount).sum()
    }

    /// Budget minus total spent. Negative when the trip is over budget;
    /// negativity is an overspend signal for presentation, not an error.
    pub fn remaining(&self, trip: &Trip) -> f64 {
        trip.budget - self.total_spent(trip)
    }

    /// Expenses of a trip in the requested order (stored order untouched).
    pub fn expenses_sorted(&self, trip: &Trip, order: ExpenseSortOrder) -> Vec<Expense> {
        let mut expenses = trip.expenses.clone();
        match order {
            ExpenseSortOrder::Insertion => {}
            // ISO date strings compare lexicographically in calendar order
            ExpenseSortOrder::DateDesc => expenses.sort_by(|a, b| b.date.cmp(&a.date)),
            ExpenseSortOrder::DateAsc => expenses.sort_by(|a, b| a.date.cmp(&b.date)),
            ExpenseSortOrder::AmountDesc => expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            ExpenseSortOrder::AmountAsc => expenses.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        }
        expenses
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse raw numeric form input, accepting only finite values.
fn parse_finite(raw: &str, field: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("{field} must be a number, got {raw:?}")))?;
    if !value.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "{field} must be a finite number"
        )));
    }
    Ok(value)
}
