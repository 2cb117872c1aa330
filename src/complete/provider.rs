//! Candidate provider trait for completion suggestions.

use async_trait::async_trait;

/// Trait for providing completion candidates.
///
/// A provider produces a finite candidate list for the given input. Calls
/// are independent and safe to repeat; a provider that hits an I/O problem
/// contributes an empty list instead of an error. Providers may run
/// concurrently, so implementations must not rely on call order.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Short provider name, used for tracing.
    fn name(&self) -> &str;

    /// Candidates for the given input.
    async fn candidates(&self, input: &str) -> Vec<String>;
}
