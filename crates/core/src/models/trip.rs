use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::Expense;

/// A named budget container holding categorized expenses.
///
/// **Important**: `expenses` is kept in insertion order, newest first.
/// The `date` field on an expense never affects this ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier
    pub id: Uuid,

    /// Display name, non-empty after trimming at the creation boundary
    pub name: String,

    /// Budget in the user's single implicit currency.
    /// Any finite number; never validated against total spend.
    pub budget: f64,

    /// Expenses, most recently added first
    pub expenses: Vec<Expense>,
}

impl Trip {
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            budget,
            expenses: Vec::new(),
        }
    }
}
