//! Deferred replies.
//!
//! Memory patterns (`decomp: $ ...`) do not answer when they match; their
//! reply is stored here instead. When a later message names no trigger that
//! answers, one stored reply is drawn at random and removed.

use rand::Rng;

/// Replies held back for later, in the order they were stored.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    entries: Vec<Vec<String>>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, reply: Vec<String>) {
        self.entries.push(reply);
    }

    /// Remove and return a uniformly chosen entry, or `None` when empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<String>> {
        if self.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.entries.len());
        Some(self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
