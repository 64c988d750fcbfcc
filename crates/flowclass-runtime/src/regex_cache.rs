//! Shared cache of compiled regular expressions
//!
//! Keys come from operator configuration, a small and trusted set, so the
//! cache is never evicted. Do not feed it untrusted patterns.

use crate::error::{Result, RuntimeError};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Pattern text to compiled matcher, shared by every executor
#[derive(Debug, Default)]
pub struct RegexCache {
    entries: RwLock<HashMap<String, Arc<Regex>>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled form of `pattern`, compiling it on first use.
    ///
    /// Compilation happens outside the lock. Two threads missing on the same
    /// pattern may both compile it; the first insert is kept.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>> {
        if let Some(regex) = self.entries.read().get(pattern) {
            return Ok(Arc::clone(regex));
        }

        let compiled = Regex::new(pattern).map_err(|error| RuntimeError::InvalidRegex {
            pattern: pattern.to_string(),
            error,
        })?;
        tracing::trace!(pattern, "Compiled regex");

        let mut entries = self.entries.write();
        let regex = entries
            .entry(pattern.to_string())
            .or_insert_with(|| Arc::new(compiled));
        Ok(Arc::clone(regex))
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached pattern
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
