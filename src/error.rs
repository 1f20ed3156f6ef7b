use std::io;

use crate::constants::{FrameNumber, PageNumber};

/// Rejected configurations. The engine never starts with one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("page size must be a non-zero power of two below 2^32, got {0}")]
    PageSize(usize),
    #[error("frame size {frame_size} does not match page size {page_size}")]
    FrameSizeMismatch { page_size: usize, frame_size: usize },
    #[error("physical memory needs at least one frame")]
    NoFrames,
    #[error("page table needs at least one entry")]
    EmptyPageTable,
    #[error("TLB needs at least one entry")]
    EmptyTlb,
    #[error("backing store pages are {store} bytes, configured page size is {page_size}")]
    StorePageSize { page_size: usize, store: usize },
    #[error("unknown replacement policy `{0}` (expected `fifo` or `noop`)")]
    UnknownPolicy(String),
    #[error(
        "replacement policy `{policy}` cannot reclaim frames, but {frames} frames back {pages} pages"
    )]
    NoReplacement {
        policy: &'static str,
        frames: usize,
        pages: usize,
    },
}

/// Fatal conditions of a translation run.
#[derive(Debug, thiserror::Error)]
pub enum VmError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(
        "logical address {address} decodes to page {page}, outside the {pages}-page address space"
    )]
    AddressOutOfRange {
        address: u32,
        page: PageNumber,
        pages: usize,
    },
    #[error("line {line}: failed to read logical address")]
    AddressRead {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: `{token}` is not a logical address")]
    InvalidAddress { line: usize, token: String },
    #[error("failed to seek to page {page} in the backing store")]
    BackingStoreSeek {
        page: PageNumber,
        #[source]
        source: io::Error,
    },
    #[error("failed to read page {page} from the backing store")]
    BackingStoreRead {
        page: PageNumber,
        #[source]
        source: io::Error,
    },
    #[error(
        "page {page} is still mapped to frame {existing}, cannot remap it to frame {frame}"
    )]
    PageAlreadyMapped {
        page: PageNumber,
        frame: FrameNumber,
        existing: FrameNumber,
    },
    #[error(
        "frame {frame} still backs page {owner}, cannot map it for page {page}"
    )]
    FrameInUse {
        page: PageNumber,
        frame: FrameNumber,
        owner: PageNumber,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
