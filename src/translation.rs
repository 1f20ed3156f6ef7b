use std::fmt;

use crate::constants::{FrameNumber, PageNumber};
use crate::error::VmError;

/// Represents the decomposed components of a logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: u32,
    pub page: PageNumber,
    pub offset: usize,
}

impl LogicalAddress {
    /// Split a raw address into page number (high bits) and offset
    /// (low `offset_bits` bits). Does not range-check the page.
    pub fn from_raw(raw: u32, offset_bits: u32) -> Self {
        let offset_mask = (1u32 << offset_bits) - 1;
        LogicalAddress {
            raw,
            page: (raw >> offset_bits) as PageNumber,
            offset: (raw & offset_mask) as usize,
        }
    }

    /// Like [`from_raw`](Self::from_raw), but rejects pages outside an
    /// address space of `pages` pages.
    pub fn decode(raw: u32, offset_bits: u32, pages: usize) -> Result<Self, VmError> {
        let va = Self::from_raw(raw, offset_bits);
        if va.page >= pages {
            return Err(VmError::AddressOutOfRange {
                address: raw,
                page: va.page,
                pages,
            });
        }
        Ok(va)
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VA({}) = (p={}, d={})", self.raw, self.page, self.offset)
    }
}

/// Which level of the hierarchy produced the frame number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    TlbHit,
    PageTableHit,
    PageFault,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::TlbHit => f.write_str("TLB hit"),
            AccessKind::PageTableHit => f.write_str("page table hit"),
            AccessKind::PageFault => f.write_str("page fault"),
        }
    }
}

/// Result of a successful address translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub address: LogicalAddress,
    pub frame: FrameNumber,
    pub physical_address: usize,
    pub value: i8,
    pub kind: AccessKind,
}

impl fmt::Display for Translation {
    /// Same line layout as the classic `correct.txt` reference output
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Virtual address: {} Physical address: {} Value: {}",
            self.address.raw, self.physical_address, self.value
        )
    }
}
