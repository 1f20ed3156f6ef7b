//! Frame replacement strategies.
//!
//! The allocator hands out free frames on its own and only consults a
//! [`ReplacementPolicy`] once physical memory is exhausted. A policy picks
//! the victim; invalidating whatever still points at it is the allocator's
//! job.

use std::collections::VecDeque;

use crate::constants::FrameNumber;

pub trait ReplacementPolicy {
    fn name(&self) -> &'static str;

    /// A free frame was just handed out.
    fn record_allocation(&mut self, frame: FrameNumber);

    /// Pick the frame to reclaim and treat it as freshly assigned.
    /// `None` means the policy cannot reclaim anything.
    fn select_victim(&mut self) -> Option<FrameNumber>;
}

/// Reclaims frames in the order they were first assigned.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    queue: VecDeque<FrameNumber>,
}

impl FifoPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames from oldest to newest assignment
    #[cfg(test)]
    pub fn order(&self) -> impl Iterator<Item = FrameNumber> + '_ {
        self.queue.iter().copied()
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn record_allocation(&mut self, frame: FrameNumber) {
        self.queue.push_back(frame);
    }

    fn select_victim(&mut self) -> Option<FrameNumber> {
        let victim = self.queue.pop_front()?;
        // reused right away, so it is now the most recent assignment
        self.queue.push_back(victim);
        Some(victim)
    }
}

/// Never reclaims. Running out of frames with this policy is fatal.
#[derive(Debug, Default)]
pub struct NoopPolicy;

impl ReplacementPolicy for NoopPolicy {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn record_allocation(&mut self, _frame: FrameNumber) {}

    fn select_victim(&mut self) -> Option<FrameNumber> {
        None
    }
}
