//! Translation lookaside buffer.
//!
//! A small fully-associative cache of page -> frame mappings. Slots are
//! overwritten in insertion order, wrapping around the ring (FIFO, not LRU),
//! and lookups are a linear scan.

use crate::constants::TLB_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: u32,
    pub frame: u32,
}

#[derive(Debug, Clone)]
pub struct Tlb {
    slots: Vec<Option<TlbEntry>>,
    insertions: usize,
}

impl Tlb {
    /// Create a TLB with `capacity` empty slots
    pub fn new(capacity: usize) -> Self {
        Tlb {
            slots: vec![None; capacity],
            insertions: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Total number of inserts since creation
    pub fn insertions(&self) -> usize {
        self.insertions
    }

    /// Look up the frame cached for `page`.
    ///
    /// Scans `min(insertions, capacity)` slots in insertion order and returns
    /// the first match. Duplicates are not pruned, so the oldest surviving
    /// entry for a page wins.
    pub fn lookup(&self, page: u32) -> Option<u32> {
        let capacity = self.capacity();
        let filled = self.insertions.min(capacity);

        (0..filled)
            .filter_map(|i| self.slots[i % capacity])
            .find(|entry| entry.page == page)
            .map(|entry| entry.frame)
    }

    /// Cache a mapping, overwriting the slot at `insertions % capacity`.
    ///
    /// There is no presence check: the same page may end up in two slots.
    pub fn insert(&mut self, page: u32, frame: u32) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        self.slots[self.insertions % capacity] = Some(TlbEntry { page, frame });
        self.insertions += 1;
    }

    /// Occupied slots in physical slot order
    #[cfg(test)]
    pub fn entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.slots.iter().flatten()
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new(TLB_CAPACITY)
    }
}
