use std::fs::File;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Result, VmError};

/// Simulated RAM: `frame_count` frames of `FRAME_SIZE` bytes, zeroed until a
/// page is copied in
pub struct PhysicalMemory {
    data: Vec<u8>,
}

impl PhysicalMemory {
    pub fn new(frame_count: usize) -> Self {
        PhysicalMemory {
            data: vec![0u8; frame_count * FRAME_SIZE],
        }
    }

    pub fn frame_count(&self) -> usize {
        self.data.len() / FRAME_SIZE
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(frame: u32) -> usize {
        frame as usize * FRAME_SIZE
    }

    /// Read a signed byte from a frame
    #[inline]
    pub fn read(&self, frame: u32, offset: u32) -> i8 {
        self.data[Self::frame_to_address(frame) + offset as usize] as i8
    }

    /// Copy a whole page into a frame
    pub fn load_frame(&mut self, frame: u32, page: &[u8; PAGE_SIZE]) {
        let start = Self::frame_to_address(frame);
        self.data[start..start + FRAME_SIZE].copy_from_slice(page);
    }

    pub fn frame(&self, frame: u32) -> &[u8] {
        let start = Self::frame_to_address(frame);
        &self.data[start..start + FRAME_SIZE]
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new(NUM_FRAMES)
    }
}

/// Direct-indexed page -> frame map, one entry per possible page number
pub struct PageTable {
    entries: Vec<Option<u32>>,
}

impl PageTable {
    /// Create a page table with every page unmapped
    pub fn new() -> Self {
        PageTable {
            entries: vec![None; NUM_PAGES],
        }
    }

    #[inline]
    pub fn lookup(&self, page: u32) -> Option<u32> {
        self.entries[page as usize]
    }

    /// Set a page table entry. Callers map each page once.
    pub fn map(&mut self, page: u32, frame: u32) {
        self.entries[page as usize] = Some(frame);
    }

    #[cfg(test)]
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out never-used frames in increasing order; frames are never reclaimed
pub struct FrameAllocator {
    next: u32,
    capacity: usize,
}

impl FrameAllocator {
    pub fn new(capacity: usize) -> Self {
        FrameAllocator { next: 0, capacity }
    }

    /// Return the next free frame, or `FrameExhaustion` once every frame is used
    pub fn allocate_next(&mut self) -> Result<u32> {
        if self.next as usize >= self.capacity {
            return Err(VmError::FrameExhaustion {
                frames: self.capacity,
            });
        }
        let frame = self.next;
        self.next += 1;
        Ok(frame)
    }

    pub fn allocated(&self) -> usize {
        self.next as usize
    }

    #[cfg(test)]
    pub fn free_count(&self) -> usize {
        self.capacity - self.allocated()
    }
}

enum StoreData {
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
}

/// Read-only secondary storage holding the full virtual address space.
///
/// File-backed stores are memory-mapped and unmapped on drop.
pub struct BackingStore {
    data: StoreData,
    path: Option<PathBuf>,
}

impl BackingStore {
    /// Map a backing store file read-only.
    ///
    /// The file must hold at least `ADDRESS_SPACE_SIZE` bytes.
    #[allow(unsafe_code)]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| VmError::StoreUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let len = file.metadata().map_err(unavailable)?.len();
        if len < ADDRESS_SPACE_SIZE as u64 {
            return Err(VmError::StoreUndersized {
                path: path.to_path_buf(),
                len,
                required: ADDRESS_SPACE_SIZE as u64,
            });
        }

        // SAFETY: the file is opened read-only and is not written during the run.
        let mmap = unsafe { memmap2::MmapOptions::new().map(&file) }.map_err(unavailable)?;

        Ok(BackingStore {
            data: StoreData::Mapped(mmap),
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap bytes already in memory. No minimum length is enforced; reads past
    /// the end fail with `OutOfRange`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        BackingStore {
            data: StoreData::Owned(bytes),
            path: None,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.data {
            StoreData::Mapped(mmap) => &mmap[..],
            StoreData::Owned(bytes) => &bytes[..],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the `PAGE_SIZE` bytes of `page`
    pub fn read_page(&self, page: u32) -> Result<&[u8; PAGE_SIZE]> {
        let bytes = self.as_slice();
        let start = page as usize * PAGE_SIZE;

        bytes
            .get(start..start + PAGE_SIZE)
            .and_then(|span| span.try_into().ok())
            .ok_or(VmError::OutOfRange {
                page,
                len: bytes.len(),
            })
    }
}
