use crate::constants::{FrameNumber, PageNumber};
use crate::error::VmError;

/// Direct-indexed page table with a frame → page reverse map, so that
/// reclaiming a frame does not need to scan every entry.
pub struct PageTable {
    entries: Vec<Option<FrameNumber>>,
    owners: Vec<Option<PageNumber>>,
}

impl PageTable {
    /// Every page starts unmapped
    pub fn new(pages: usize, frames: usize) -> Self {
        PageTable {
            entries: vec![None; pages],
            owners: vec![None; frames],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn lookup(&self, page: PageNumber) -> Option<FrameNumber> {
        self.entries[page]
    }

    /// Page currently backed by `frame`, if any
    #[inline]
    pub fn page_for_frame(&self, frame: FrameNumber) -> Option<PageNumber> {
        self.owners[frame]
    }

    /// Install `page → frame`.
    ///
    /// Neither side may already be bound elsewhere; stale mappings have to
    /// be cleared with [`invalidate_by_frame`](Self::invalidate_by_frame)
    /// first. Re-installing an identical mapping is a no-op.
    pub fn map(&mut self, page: PageNumber, frame: FrameNumber) -> Result<(), VmError> {
        match self.entries[page] {
            Some(existing) if existing == frame => return Ok(()),
            Some(existing) => {
                return Err(VmError::PageAlreadyMapped {
                    page,
                    frame,
                    existing,
                });
            }
            None => {}
        }
        if let Some(owner) = self.owners[frame] {
            return Err(VmError::FrameInUse { page, frame, owner });
        }

        self.entries[page] = Some(frame);
        self.owners[frame] = Some(page);
        Ok(())
    }

    /// Clear whichever page maps to `frame`. Returns whether one did.
    pub fn invalidate_by_frame(&mut self, frame: FrameNumber) -> bool {
        match self.owners[frame].take() {
            Some(page) => {
                self.entries[page] = None;
                true
            }
            None => false,
        }
    }

    pub fn mapped_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }

    /// All live `(page, frame)` pairs in page order
    pub fn mappings(&self) -> impl Iterator<Item = (PageNumber, FrameNumber)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, frame)| frame.map(|f| (page, f)))
    }
}
