pub mod backing_store;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame_alloc;
pub mod io;
pub mod logger;
pub mod memory;
pub mod page_table;
pub mod replacement;
pub mod stats;
pub mod tlb;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use backing_store::{BackingStore, FileBackingStore, SeekBackingStore};
pub use config::{PolicyKind, VmConfig};
pub use constants::*;
pub use error::{ConfigError, VmError};
pub use stats::Statistics;
pub use translation::{AccessKind, LogicalAddress, Translation};
pub use vm_manager::VmManager;
