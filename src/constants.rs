pub const OFFSET_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const FRAME_SIZE: usize = PAGE_SIZE;

pub const PAGE_TABLE_SIZE: usize = 256;
pub const NUMBER_OF_FRAMES: usize = 64;
pub const TLB_SIZE: usize = 16;

pub type PageNumber = usize;
pub type FrameNumber = usize;
