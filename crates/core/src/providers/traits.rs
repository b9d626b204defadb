use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for text-generation providers (SOLID: Dependency Inversion).
///
/// The assistant service talks only to this trait. If the hosted API stops
/// working or changes, we replace that one implementation and the rest of
/// the codebase is untouched; tests substitute an offline mock.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Sends a single prompt and returns the generated reply text.
    /// Exactly one request per call: no retry, no streaming.
    async fn generate(&self, prompt: &str) -> Result<String, CoreError>;
}
