use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending category of an expense.
/// Determines the icon the presentation layer renders next to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Meals, snacks, groceries
    Food,
    /// Taxis, trains, flights, fuel
    Transport,
    /// Hotels, rentals, campsites
    Accommodation,
    /// Tickets, tours, nightlife
    Entertainment,
    /// Souvenirs and retail
    Shopping,
    /// Fallback for everything else, including unrecognized input
    Other,
}

impl Category {
    /// All categories, in the order the presentation layer lists them.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Accommodation,
        Category::Entertainment,
        Category::Shopping,
        Category::Other,
    ];

    /// Parses user or persisted input, case-insensitively.
    ///
    /// Never fails: anything outside the known set maps to [`Category::Other`],
    /// so an expense with an unrecognized category still loads and renders.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "accommodation" => Category::Accommodation,
            "entertainment" => Category::Entertainment,
            "shopping" => Category::Shopping,
            _ => Category::Other,
        }
    }

    /// Stable lowercase name used in persisted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Accommodation => "accommodation",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    /// Phosphor icon identifier for this category.
    /// `Other` doubles as the default icon for unrecognized input.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "ph-hamburger",
            Category::Transport => "ph-taxi",
            Category::Accommodation => "ph-house-line",
            Category::Entertainment => "ph-ticket",
            Category::Shopping => "ph-shopping-bag",
            Category::Other => "ph-dots-three",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Food => write!(f, "Food"),
            Category::Transport => write!(f, "Transport"),
            Category::Accommodation => write!(f, "Accommodation"),
            Category::Entertainment => write!(f, "Entertainment"),
            Category::Shopping => write!(f, "Shopping"),
            Category::Other => write!(f, "Other"),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown category strings in stored data fall back rather than
        // failing the whole snapshot.
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse(&raw))
    }
}

/// Sort order for expense listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseSortOrder {
    /// Stored order: most recently added first (default for display)
    Insertion,
    /// Newest date first
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// A single dated, categorized spend record belonging to one trip.
///
/// Deliberately permissive: `title` may be empty, `amount` may be zero or
/// negative, and `date` is stored exactly as supplied (ISO `YYYY-MM-DD` by
/// convention, never validated as a real calendar date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier within the owning trip
    pub id: Uuid,

    /// Free-text description, may be empty
    pub title: String,

    /// Spend amount, expected positive but not enforced
    pub amount: f64,

    /// Spending category (unrecognized input collapses to `Other`)
    pub category: Category,

    /// Date string as supplied, used for display and sorting only
    pub date: String,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: Category,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date: date.into(),
        }
    }
}

/// Today's date as an ISO `YYYY-MM-DD` string (UTC).
///
/// Convenience for presentation layers pre-filling the date field of a new
/// expense form. Stored dates are whatever the caller passes in.
pub fn today_iso() -> String {
    chrono::Utc::now().date_naive().to_string()
}
