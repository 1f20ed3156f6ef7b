use std::collections::VecDeque;

use log::debug;

use crate::constants::{FrameNumber, PageNumber};
use crate::error::{ConfigError, VmError};
use crate::page_table::PageTable;
use crate::replacement::ReplacementPolicy;
use crate::tlb::Tlb;

/// Outcome of [`FrameAllocator::allocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub frame: FrameNumber,
    /// Page that lost `frame`, when the frame had to be reclaimed.
    pub evicted: Option<PageNumber>,
}

/// Hands out physical frames, lowest free index first, and reclaims one
/// through the replacement policy once none are free.
pub struct FrameAllocator {
    free: VecDeque<FrameNumber>,
    frame_count: usize,
    policy: Box<dyn ReplacementPolicy>,
}

impl FrameAllocator {
    pub fn new(frame_count: usize, policy: Box<dyn ReplacementPolicy>) -> Self {
        FrameAllocator {
            free: (0..frame_count).collect(),
            frame_count,
            policy,
        }
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Get a frame for a new page.
    ///
    /// A reclaimed frame has its page-table and TLB entries cleared before
    /// it is returned, so no stale translation can still reach it.
    ///
    /// # Errors
    /// Memory is full and the policy cannot reclaim anything.
    pub fn allocate(
        &mut self,
        page_table: &mut PageTable,
        tlb: &mut Tlb,
    ) -> Result<Allocation, VmError> {
        if let Some(frame) = self.free.pop_front() {
            self.policy.record_allocation(frame);
            return Ok(Allocation {
                frame,
                evicted: None,
            });
        }

        let Some(victim) = self.policy.select_victim() else {
            return Err(ConfigError::NoReplacement {
                policy: self.policy.name(),
                frames: self.frame_count,
                pages: page_table.len(),
            }
            .into());
        };

        let evicted = page_table.page_for_frame(victim);
        page_table.invalidate_by_frame(victim);
        tlb.invalidate_by_frame(victim);
        debug!(
            "reclaimed frame {victim} from page {evicted:?} ({})",
            self.policy.name()
        );

        Ok(Allocation {
            frame: victim,
            evicted,
        })
    }
}
