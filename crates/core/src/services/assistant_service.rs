use serde::Serialize;

use crate::errors::CoreError;
use crate::models::expense::Expense;
use crate::models::trip::Trip;
use crate::providers::traits::TextProvider;

/// Snapshot of the current trip sent with every question.
///
/// Field names are part of the prompt contract (`tripName`, `budget`,
/// `expenses`); the model is told to answer only from this data.
#[derive(Debug, Clone, Serialize)]
pub struct TripSnapshot {
    #[serde(rename = "tripName")]
    pub trip_name: String,
    pub budget: f64,
    pub expenses: Vec<Expense>,
}

impl From<&Trip> for TripSnapshot {
    fn from(trip: &Trip) -> Self {
        Self {
            trip_name: trip.name.clone(),
            budget: trip.budget,
            expenses: trip.expenses.clone(),
        }
    }
}

/// Builds the single-turn prompt: fixed instructions, the JSON-serialized
/// trip snapshot, then the literal user question.
pub fn build_prompt(question: &str, snapshot: &TripSnapshot) -> Result<String, CoreError> {
    let data = serde_json::to_string(snapshot)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize trip snapshot: {e}")))?;

    Ok(format!(
        "You are a helpful travel budget assistant.\n\
         Here is the current trip data in JSON format:\n\
         {data}\n\n\
         User Question: {question}\n\n\
         Answer concisely and helpfully based ONLY on the data provided.\n\
         If asked to calculate, double-check your math.\n\
         Format currency as $X.XX."
    ))
}

/// Turns a trip snapshot plus a free-text question into one provider
/// request and returns the reply text.
///
/// Holds no conversation state: every ask re-sends the latest snapshot.
pub struct AssistantService {
    provider: Option<Box<dyn TextProvider>>,
}

impl AssistantService {
    /// An unconfigured service; every ask fails with `CredentialMissing`
    /// until a provider is attached.
    pub fn new() -> Self {
        Self { provider: None }
    }

    pub fn with_provider(provider: Box<dyn TextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn set_provider(&mut self, provider: Box<dyn TextProvider>) {
        self.provider = Some(provider);
    }

    /// Drops the configured provider.
    pub fn clear_provider(&mut self) {
        self.provider = None;
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the configured provider, if any (for logs/UI).
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Ask one question about the given snapshot.
    ///
    /// The question must be non-empty after trimming; a missing provider
    /// fails before any network activity. Exactly one outbound request per
    /// call, no retry.
    pub async fn ask(&self, question: &str, snapshot: &TripSnapshot) -> Result<String, CoreError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CoreError::ValidationError(
                "Question must not be empty".into(),
            ));
        }

        let provider = self
            .provider
            .as_deref()
            .ok_or(CoreError::CredentialMissing)?;

        let prompt = build_prompt(question, snapshot)?;

        tracing::debug!(provider = %provider.name(), "sending assistant question");
        provider.generate(&prompt).await
    }
}

impl Default for AssistantService {
    fn default() -> Self {
        Self::new()
    }
}
