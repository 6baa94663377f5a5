//! In-memory appender
//!
//! Keeps every entry it receives so they can be inspected later through a
//! [`MemoryHandle`]. Useful in tests and for surfacing recent log lines.

use crate::core::{Appender, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    capacity: Option<usize>,
}

/// Read side of a [`MemoryAppender`]; clones share the same buffer
#[derive(Clone, Default)]
pub struct MemoryHandle {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            capacity: None,
        }
    }

    /// Keep only the most recent `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
            capacity: Some(capacity),
        }
    }

    pub fn handle(&self) -> MemoryHandle {
        MemoryHandle {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(());
            }
            if entries.len() >= capacity {
                entries.remove(0);
            }
        }
        entries.push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl MemoryHandle {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Entries produced by the logger called `name`
    pub fn entries_for(&self, name: &str) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.logger == name)
            .cloned()
            .collect()
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.entries.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
