//! # Engine Configuration
//!
//! Policy values the engine consumes but does not define. The capacity is the
//! externally configured overflow threshold: pushing past it still succeeds,
//! but a `stack_overflow` log entry is recorded.

use std::env;

/// Configuration for [`crate::StackEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Overflow threshold (default: none, no overflow logging).
    pub capacity: Option<usize>,

    /// Record a log entry for every successful write-back (default: true).
    pub record_operations: bool,

    /// Keep at most this many log entries per stack (default: 1024).
    ///
    /// Oldest entries are dropped first. `None` keeps everything.
    pub max_log_entries: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            record_operations: true,
            max_log_entries: Some(1024),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STACK_CAPACITY`: Overflow threshold (default: unset)
    /// - `STACK_RECORD_OPERATIONS`: Record per-write log entries (default: true)
    /// - `STACK_MAX_LOG_ENTRIES`: Log retention, `0` for unlimited (default: 1024)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let capacity = lookup("STACK_CAPACITY")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .or(defaults.capacity);

        let record_operations = lookup("STACK_RECORD_OPERATIONS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.record_operations);

        let max_log_entries = match lookup("STACK_MAX_LOG_ENTRIES")
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            Some(0) => None,
            Some(n) => Some(n),
            None => defaults.max_log_entries,
        };

        Self {
            capacity,
            record_operations,
            max_log_entries,
        }
    }

    /// Set the overflow threshold.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Enable or disable per-write log entries.
    pub fn with_record_operations(mut self, record: bool) -> Self {
        self.record_operations = record;
        self
    }

    /// Set log retention. `None` or `Some(0)` keeps every entry.
    pub fn with_max_log_entries(mut self, max: Option<usize>) -> Self {
        self.max_log_entries = max.filter(|&n| n > 0);
        self
    }

    /// Whether `len` elements exceeds the configured capacity.
    pub fn exceeds_capacity(&self, len: usize) -> bool {
        self.capacity.is_some_and(|cap| len > cap)
    }
}
