use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::ConfigError;
use crate::replacement::{FifoPolicy, NoopPolicy, ReplacementPolicy};

/// Which frame-replacement strategy the allocator falls back to once
/// physical memory is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Fifo,
    /// Never reclaims anything. Only usable when every page fits in memory.
    Noop,
}

impl PolicyKind {
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Noop => "noop",
        }
    }

    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Noop => Box::new(NoopPolicy),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "noop" => Ok(PolicyKind::Noop),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Geometry of the simulated machine. Fixed for the lifetime of a
/// [`VmManager`](crate::vm_manager::VmManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmConfig {
    pub page_size: usize,
    pub frame_size: usize,
    pub frame_count: usize,
    pub page_table_size: usize,
    pub tlb_capacity: usize,
    pub policy: PolicyKind,
}

impl Default for VmConfig {
    /// Physical memory smaller than logical memory, FIFO replacement.
    fn default() -> Self {
        VmConfig {
            page_size: PAGE_SIZE,
            frame_size: FRAME_SIZE,
            frame_count: NUMBER_OF_FRAMES,
            page_table_size: PAGE_TABLE_SIZE,
            tlb_capacity: TLB_SIZE,
            policy: PolicyKind::Fifo,
        }
    }
}

impl VmConfig {
    /// One frame per page, so replacement never kicks in.
    pub fn unconstrained() -> Self {
        VmConfig {
            frame_count: PAGE_TABLE_SIZE,
            ..Self::default()
        }
    }

    pub fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn with_page_table_size(mut self, page_table_size: usize) -> Self {
        self.page_table_size = page_table_size;
        self
    }

    pub fn with_tlb_capacity(mut self, tlb_capacity: usize) -> Self {
        self.tlb_capacity = tlb_capacity;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Number of low-order address bits holding the offset.
    #[inline]
    pub fn offset_bits(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// Whether the allocator can ever run out of free frames.
    pub fn needs_replacement(&self) -> bool {
        self.frame_count < self.page_table_size
    }

    /// # Errors
    /// The first inconsistency found, see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.page_size.is_power_of_two() || self.offset_bits() >= u32::BITS {
            return Err(ConfigError::PageSize(self.page_size));
        }
        if self.frame_size != self.page_size {
            return Err(ConfigError::FrameSizeMismatch {
                page_size: self.page_size,
                frame_size: self.frame_size,
            });
        }
        if self.frame_count == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.page_table_size == 0 {
            return Err(ConfigError::EmptyPageTable);
        }
        if self.tlb_capacity == 0 {
            return Err(ConfigError::EmptyTlb);
        }
        if self.policy == PolicyKind::Noop && self.needs_replacement() {
            return Err(ConfigError::NoReplacement {
                policy: self.policy.name(),
                frames: self.frame_count,
                pages: self.page_table_size,
            });
        }
        Ok(())
    }
}
