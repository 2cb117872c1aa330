//! Completion engine - caching, ordered merge, and cursor cycling.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::provider::CandidateProvider;

/// Main completion engine.
///
/// Holds the providers in priority order plus the state for one input
/// session: the input the candidates were computed for, the merged
/// candidate list, and the cycling cursor. Candidates are recomputed only
/// when the input string differs from the cached one; cycling never
/// re-queries providers.
pub struct CompletionEngine {
    /// Providers in fixed priority order.
    providers: Vec<Arc<dyn CandidateProvider>>,

    /// Input the current candidates were computed for.
    raw_input: Option<String>,

    /// Deduplicated merged candidates for `raw_input`.
    candidates: Vec<String>,

    /// Index into `candidates` for cycling; `None` when idle.
    cursor: Option<usize>,
}

impl CompletionEngine {
    /// Create a new completion engine.
    ///
    /// # Arguments
    /// * `providers` - Candidate providers in priority order; earlier
    ///   providers win placement over later ones in the merged list
    pub fn new(providers: Vec<Arc<dyn CandidateProvider>>) -> Self {
        Self {
            providers,
            raw_input: None,
            candidates: Vec::new(),
            cursor: None,
        }
    }

    /// Compute (or return cached) suggestions for the given input.
    ///
    /// Providers are queried concurrently; results are merged in provider
    /// order and deduplicated preserving first-seen order. Recomputation
    /// resets the cycling cursor.
    pub async fn request_suggestions(&mut self, input: &str) -> Vec<String> {
        if self.raw_input.as_deref() == Some(input) {
            return self.candidates.clone();
        }

        let queries = self.providers.iter().map(|p| p.candidates(input));
        let results = futures::future::join_all(queries).await;

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for (provider, list) in self.providers.iter().zip(results) {
            debug!("{}: {} candidates", provider.name(), list.len());
            for candidate in list {
                if seen.insert(candidate.clone()) {
                    merged.push(candidate);
                }
            }
        }

        self.raw_input = Some(input.to_string());
        self.candidates = merged;
        self.cursor = None;
        self.candidates.clone()
    }

    /// Advance the cycling cursor and return the selected candidate.
    ///
    /// Wraps to the first candidate after the last one. Returns `None`
    /// when there are no candidates. Pure cycling over the cached list;
    /// providers are never re-queried.
    pub fn advance_cursor(&mut self) -> Option<&str> {
        if self.candidates.is_empty() {
            return None;
        }
        let next = match self.cursor {
            Some(index) => (index + 1) % self.candidates.len(),
            None => 0,
        };
        self.cursor = Some(next);
        self.candidates.get(next).map(String::as_str)
    }

    /// Clear cached input, candidates, and cursor.
    ///
    /// Called whenever the input is edited by any means other than
    /// accepting a suggestion, and after a line is submitted.
    pub fn reset(&mut self) {
        self.raw_input = None;
        self.candidates.clear();
        self.cursor = None;
    }

    /// Current candidate list.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Current cursor position, `None` when idle.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider returning a fixed list and counting how often it is asked.
    struct FixedProvider {
        name: &'static str,
        items: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(name: &'static str, items: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                items,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CandidateProvider for FixedProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn candidates(&self, _input: &str) -> Vec<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.items.iter().map(|s| s.to_string()).collect()
        }
    }

    #[tokio::test]
    async fn merge_preserves_priority_and_dedups() {
        let scripts = FixedProvider::new("scripts", vec!["npm run test"]);
        let keywords = FixedProvider::new("keywords", vec!["npm run", "npm run test"]);
        let mut engine = CompletionEngine::new(vec![scripts, keywords]);

        let merged = engine.request_suggestions("npm run").await;
        assert_eq!(merged, vec!["npm run test", "npm run"]);
    }

    #[tokio::test]
    async fn repeated_request_uses_cache() {
        let provider = FixedProvider::new("fixed", vec!["alpha", "beta"]);
        let mut engine = CompletionEngine::new(vec![provider.clone()]);

        let first = engine.request_suggestions("a").await;
        let second = engine.request_suggestions("a").await;

        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn changed_input_requeries_and_resets_cursor() {
        let provider = FixedProvider::new("fixed", vec!["alpha", "beta"]);
        let mut engine = CompletionEngine::new(vec![provider.clone()]);

        engine.request_suggestions("a").await;
        assert_eq!(engine.advance_cursor(), Some("alpha"));

        engine.request_suggestions("b").await;
        assert_eq!(engine.cursor(), None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cursor_cycles_back_to_start() {
        let provider = FixedProvider::new("fixed", vec!["one", "two", "three"]);
        let mut engine = CompletionEngine::new(vec![provider]);
        engine.request_suggestions("x").await;

        let n = engine.candidates().len();
        let first = engine.advance_cursor().map(str::to_string);
        for _ in 1..n {
            engine.advance_cursor();
        }
        // n advances from idle land back on the first candidate.
        let wrapped = engine.advance_cursor().map(str::to_string);
        assert_eq!(first, wrapped);
        assert_eq!(first.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn single_candidate_cycles_to_itself() {
        let provider = FixedProvider::new("fixed", vec!["only"]);
        let mut engine = CompletionEngine::new(vec![provider]);
        engine.request_suggestions("o").await;

        assert_eq!(engine.advance_cursor(), Some("only"));
        assert_eq!(engine.advance_cursor(), Some("only"));
        assert_eq!(engine.advance_cursor(), Some("only"));
    }

    #[tokio::test]
    async fn advance_on_empty_candidates_is_none() {
        let provider = FixedProvider::new("fixed", vec![]);
        let mut engine = CompletionEngine::new(vec![provider]);
        engine.request_suggestions("zzz").await;
        assert_eq!(engine.advance_cursor(), None);
    }

    #[tokio::test]
    async fn reset_clears_state() {
        let provider = FixedProvider::new("fixed", vec!["alpha"]);
        let mut engine = CompletionEngine::new(vec![provider.clone()]);
        engine.request_suggestions("a").await;
        engine.advance_cursor();

        engine.reset();
        assert!(engine.candidates().is_empty());
        assert_eq!(engine.cursor(), None);

        // A request for the same input after reset re-queries providers.
        engine.request_suggestions("a").await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
