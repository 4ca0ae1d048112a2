//! Shared matcher for front ends that append entries while serving queries.
//!
//! Readers run concurrently under the read lock; `add_entry` takes the write
//! lock, so appends are serialized against scans.

use crate::corpus::CorpusEntry;
use crate::matcher::{Answer, Diagnostics, Matcher};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedMatcher {
    inner: Arc<RwLock<Matcher>>,
}

impl SharedMatcher {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            inner: Arc::new(RwLock::new(matcher)),
        }
    }

    // Appends only ever push a fully prepared entry, so a poisoned lock
    // still guards a consistent corpus.
    fn read(&self) -> RwLockReadGuard<'_, Matcher> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Matcher> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_answer(&self, user_text: &str) -> Answer {
        self.read().get_answer(user_text)
    }

    pub fn diagnostics(&self, user_text: &str) -> Option<Diagnostics> {
        self.read().diagnostics(user_text)
    }

    pub fn threshold(&self) -> f64 {
        self.read().threshold()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn add_entry(&self, entry: CorpusEntry) {
        self.write().add_entry(entry);
    }
}
