// address layout: 16-bit logical/physical addresses, 8-bit page number, 8-bit offset
pub const OFFSET_BITS: u32 = 8;
pub const PAGE_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const NUM_PAGES: usize = 1 << PAGE_BITS;
pub const NUM_FRAMES: usize = 256;
pub const FRAME_SIZE: usize = PAGE_SIZE;

pub const ADDRESS_SPACE_SIZE: usize = NUM_PAGES * PAGE_SIZE;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = (1 << PAGE_BITS) - 1;

pub const TLB_CAPACITY: usize = 16;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
pub const DEFAULT_OUTPUT: &str = "output.txt";
