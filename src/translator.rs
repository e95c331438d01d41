//! Translation pipeline: TLB, then page table, then page fault.
//!
//! A [`Translator`] owns every piece of per-run state (TLB, page table,
//! physical memory, frame cursor and counters) and borrows the backing store
//! read-only. Build a fresh one per run.

use crate::constants::*;
use crate::error::Result;
use crate::memory::{BackingStore, FrameAllocator, PageTable, PhysicalMemory};
use crate::stats::Counters;
use crate::tlb::Tlb;
use crate::translation::{compose, Access, LogicalAddress, TranslationRecord};

pub struct Translator<'s> {
    store: &'s BackingStore,
    tlb: Tlb,
    page_table: PageTable,
    memory: PhysicalMemory,
    frames: FrameAllocator,
    counters: Counters,
}

impl<'s> Translator<'s> {
    pub fn new(store: &'s BackingStore, frame_count: usize, tlb_capacity: usize) -> Self {
        Translator {
            store,
            tlb: Tlb::new(tlb_capacity),
            page_table: PageTable::new(),
            memory: PhysicalMemory::new(frame_count),
            frames: FrameAllocator::new(frame_count),
            counters: Counters::default(),
        }
    }

    /// Translator with 256 frames and a 16-entry TLB
    pub fn with_defaults(store: &'s BackingStore) -> Self {
        Self::new(store, NUM_FRAMES, TLB_CAPACITY)
    }

    /// Translate one logical address and read the byte it refers to.
    ///
    /// A TLB hit is trusted without re-checking the page table. Errors
    /// (`OutOfRange`, `FrameExhaustion`) leave the counters, the frame cursor
    /// and the page table untouched.
    pub fn translate(&mut self, raw: u32) -> Result<TranslationRecord> {
        let logical = LogicalAddress::from_raw(raw);

        let (frame, access) = match self.tlb.lookup(logical.page) {
            Some(frame) => (frame, Access::TlbHit),
            None => {
                let (frame, access) = match self.page_table.lookup(logical.page) {
                    Some(frame) => (frame, Access::TableHit),
                    None => (self.service_fault(logical.page)?, Access::PageFault),
                };
                self.tlb.insert(logical.page, frame);
                (frame, access)
            }
        };

        self.counters.record(access);

        Ok(TranslationRecord {
            logical,
            frame,
            physical: compose(frame, logical.offset),
            value: self.memory.read(frame, logical.offset),
            access,
        })
    }

    /// Bring `page` in from the backing store and map it to a fresh frame
    fn service_fault(&mut self, page: u32) -> Result<u32> {
        let bytes = self.store.read_page(page)?;
        let frame = self.frames.allocate_next()?;
        self.memory.load_frame(frame, bytes);
        self.page_table.map(page, frame);
        Ok(frame)
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames_used(&self) -> usize {
        self.frames.allocated()
    }
}
