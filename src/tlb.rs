use crate::constants::{FrameNumber, PageNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TlbEntry {
    pub page: PageNumber,
    pub frame: FrameNumber,
    pub valid: bool,
}

/// Translation lookaside buffer.
///
/// A fixed ring of slots searched linearly. Inserts always go to the slot
/// under the write cursor, whether or not it is valid, and the cursor then
/// advances modulo capacity: eviction is by insertion order, not by use.
pub struct Tlb {
    entries: Vec<TlbEntry>,
    next: usize,
    hits: u64,
}

impl Tlb {
    /// Create a TLB with every slot invalid
    pub fn new(capacity: usize) -> Self {
        Tlb {
            entries: vec![TlbEntry::default(); capacity],
            next: 0,
            hits: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of successful lookups so far
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn lookup(&mut self, page: PageNumber) -> Option<FrameNumber> {
        let frame = self
            .entries
            .iter()
            .find(|e| e.valid && e.page == page)
            .map(|e| e.frame)?;
        self.hits += 1;
        Some(frame)
    }

    /// Install `page → frame` at the write cursor. Any other valid slot
    /// already holding `page` is cleared first; the cursor does not move
    /// for that.
    pub fn insert(&mut self, page: PageNumber, frame: FrameNumber) {
        for entry in self.entries.iter_mut().filter(|e| e.valid && e.page == page) {
            *entry = TlbEntry::default();
        }
        self.entries[self.next] = TlbEntry {
            page,
            frame,
            valid: true,
        };
        self.next = (self.next + 1) % self.entries.len();
    }

    /// Drop every valid entry pointing at `frame`. Returns whether any did.
    pub fn invalidate_by_frame(&mut self, frame: FrameNumber) -> bool {
        let mut found = false;
        for entry in self.entries.iter_mut().filter(|e| e.valid && e.frame == frame) {
            *entry = TlbEntry::default();
            found = true;
        }
        found
    }

    /// Invalidate every slot and rewind the write cursor
    pub fn flush(&mut self) {
        self.entries.fill(TlbEntry::default());
        self.next = 0;
    }

    pub fn valid_entries(&self) -> impl Iterator<Item = &TlbEntry> + '_ {
        self.entries.iter().filter(|e| e.valid)
    }
}
