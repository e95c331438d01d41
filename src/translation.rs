use crate::constants::*;

/// Represents the decomposed components of a logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: u32,
    pub page: u32,
    pub offset: u32,
}

impl LogicalAddress {
    /// Decompose a raw logical address into page number and offset.
    ///
    /// Bits above the page-number field are discarded, so any `u32` is accepted.
    pub fn from_raw(raw: u32) -> Self {
        let offset = raw & OFFSET_MASK;
        let page = (raw >> OFFSET_BITS) & PAGE_MASK;

        LogicalAddress { raw, page, offset }
    }
}

impl std::fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LA({}) = (p={}, d={})", self.raw, self.page, self.offset)
    }
}

/// Compose a physical address from a frame number and an offset
#[inline]
pub fn compose(frame: u32, offset: u32) -> u32 {
    (frame << OFFSET_BITS) | offset
}

/// Where a translation was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    TlbHit,
    TableHit,
    PageFault,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Access::TlbHit => "TLB hit",
            Access::TableHit => "page table hit",
            Access::PageFault => "page fault",
        };
        f.write_str(label)
    }
}

/// Outcome of translating one logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRecord {
    pub logical: LogicalAddress,
    pub frame: u32,
    pub physical: u32,
    pub value: i8,
    pub access: Access,
}

impl TranslationRecord {
    /// Output file line, without the trailing newline
    pub fn to_output(&self) -> String {
        format!("{},{},{}", self.logical.raw, self.physical, self.value)
    }
}
