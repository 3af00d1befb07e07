//! Bookkeeping for fallback loops.
//!
//! A fallback loop tries targets in order until one succeeds. [`FallbackRun`]
//! records every attempt so the caller can report either the last failure
//! or all of them.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

/// Message used when a fallback loop had no targets, or none reported.
pub const ALL_FAILED: &str = "all endpoints failed";

// ============================================================================
// Fetch Attempt
// ============================================================================

/// Record of a single attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchAttempt {
    /// The target that was attempted.
    pub target: String,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl FetchAttempt {
    /// Creates a successful attempt record.
    pub fn success(target: impl Into<String>, duration: Duration) -> Self {
        Self {
            target: target.into(),
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(target: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            target: target.into(),
            error: Some(error.into()),
            duration,
        }
    }

    /// Returns true if the attempt succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

// ============================================================================
// Error Policy
// ============================================================================

/// Which failure message a fully failed loop reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The last attempt's error.
    #[default]
    LastError,
    /// Every attempt's error, joined with `"; "`.
    AllErrors,
}

// ============================================================================
// Fallback Run
// ============================================================================

/// Attempts recorded by one fallback loop.
#[derive(Debug)]
pub struct FallbackRun {
    attempts: Vec<FetchAttempt>,
    started: Instant,
    current: Option<(String, Instant)>,
}

impl Default for FallbackRun {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackRun {
    /// Starts an empty run.
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
            started: Instant::now(),
            current: None,
        }
    }

    /// Marks the start of an attempt against `target`.
    pub fn begin(&mut self, target: impl Into<String>) {
        let target = target.into();
        debug!(target = %target, attempt = self.attempts.len() + 1, "Trying target");
        self.current = Some((target, Instant::now()));
    }

    fn finish(&mut self) -> (String, Duration) {
        match self.current.take() {
            Some((target, at)) => (target, at.elapsed()),
            None => (String::new(), Duration::ZERO),
        }
    }

    /// Records success of the current attempt.
    pub fn succeed(&mut self) {
        let (target, duration) = self.finish();
        info!(target = %target, duration = ?duration, "Target succeeded");
        self.attempts.push(FetchAttempt::success(target, duration));
    }

    /// Records failure of the current attempt.
    pub fn fail(&mut self, error: impl Into<String>) {
        let (target, duration) = self.finish();
        let error = error.into();
        warn!(target = %target, error = %error, duration = ?duration, "Target failed");
        self.attempts.push(FetchAttempt::failure(target, error, duration));
    }

    /// Returns all attempts made so far.
    pub fn attempts(&self) -> &[FetchAttempt] {
        &self.attempts
    }

    /// Returns the errors in attempt order.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }

    /// Returns the most recent error.
    pub fn last_error(&self) -> Option<&str> {
        self.attempts.iter().rev().find_map(|a| a.error.as_deref())
    }

    /// Returns total time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns the failure message under `policy`.
    ///
    /// Falls back to [`ALL_FAILED`] when nothing failed with a message.
    pub fn failure_message(&self, policy: ErrorPolicy) -> String {
        let message = match policy {
            ErrorPolicy::LastError => self.last_error().map(str::to_string),
            ErrorPolicy::AllErrors => {
                let errors = self.errors();
                (!errors.is_empty()).then(|| errors.join("; "))
            }
        };
        message.unwrap_or_else(|| ALL_FAILED.to_string())
    }
}
