//! The text generation gateway: the single point through which every
//! language-model call passes.
//!
//! Callers get plain text back. Any failure (transport, API status, empty
//! body, deadline) is logged, remembered as a notice for the user, and
//! surfaces as an empty string.

use crate::error::{InterviewCoachError, Result};
use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::time::Duration;

/// A backend able to turn a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Short name for logs
    fn name(&self) -> &str {
        "generator"
    }
}

pub struct Gateway {
    backend: Box<dyn TextGenerator>,
    timeout: Duration,
    cache: HashMap<String, String>,
    enable_cache: bool,
    notices: Vec<String>,
    calls: usize,
}

impl Gateway {
    pub fn new(backend: Box<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            cache: HashMap::new(),
            enable_cache: true,
            notices: Vec::new(),
            calls: 0,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Generate text for `prompt`, or an empty string if nothing usable came back.
    pub async fn generate(&mut self, prompt: &str) -> String {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(prompt) {
                debug!("Gateway cache hit ({} chars)", prompt.len());
                return cached.clone();
            }
        }

        self.calls += 1;
        match self.call_backend(prompt).await {
            Ok(text) => {
                if self.enable_cache {
                    self.cache.insert(prompt.to_string(), text.clone());
                }
                text
            }
            Err(e) => {
                warn!("Gateway call via {} failed: {}", self.backend.name(), e);
                self.notices.push(format!("Error with the language model service: {}", e));
                String::new()
            }
        }
    }

    async fn call_backend(&self, prompt: &str) -> Result<String> {
        let text = tokio::time::timeout(self.timeout, self.backend.generate(prompt))
            .await
            .map_err(|_| InterviewCoachError::Timeout(self.timeout.as_secs()))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(InterviewCoachError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    /// Drain the failure notices gathered since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Number of backend calls actually made (cache hits excluded).
    pub fn backend_calls(&self) -> usize {
        self.calls
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Echo {
        hits: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            Ok(format!("  echo: {}\n", prompt))
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(InterviewCoachError::Gateway {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    struct Slow;

    #[async_trait]
    impl TextGenerator for Slow {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_identical_prompts_are_memoized() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut gateway = Gateway::new(Box::new(Echo { hits: hits.clone() }), Duration::from_secs(5));

        assert_eq!(gateway.generate("hello").await, "echo: hello");
        assert_eq!(gateway.generate("hello").await, "echo: hello");
        assert_eq!(gateway.generate("other").await, "echo: other");

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(gateway.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut gateway =
            Gateway::new(Box::new(Echo { hits: hits.clone() }), Duration::from_secs(5)).with_cache(false);

        gateway.generate("hello").await;
        gateway.generate("hello").await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_becomes_empty_text_and_notice() {
        let mut gateway = Gateway::new(Box::new(Failing), Duration::from_secs(5));

        assert_eq!(gateway.generate("anything").await, "");
        let notices = gateway.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("overloaded"));
        assert!(gateway.take_notices().is_empty());
        // failures are not memoized
        assert_eq!(gateway.cache_size(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_turns_into_empty_text() {
        let mut gateway = Gateway::new(Box::new(Slow), Duration::from_secs(30));

        assert_eq!(gateway.generate("slow prompt").await, "");
        assert!(gateway.take_notices()[0].contains("timed out"));
    }
}
