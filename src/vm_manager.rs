use log::{debug, info, trace};

use crate::backing_store::BackingStore;
use crate::config::VmConfig;
use crate::constants::{FrameNumber, PageNumber};
use crate::error::{ConfigError, VmError};
use crate::frame_alloc::FrameAllocator;
use crate::memory::FrameStore;
use crate::page_table::PageTable;
use crate::replacement::ReplacementPolicy;
use crate::stats::Statistics;
use crate::tlb::Tlb;
use crate::translation::{AccessKind, LogicalAddress, Translation};

/// Translation engine: owns the whole simulated machine for one run.
///
/// Every request is resolved TLB first, then page table, then backing
/// store, before the next one is looked at.
pub struct VmManager<S> {
    config: VmConfig,
    memory: FrameStore,
    page_table: PageTable,
    tlb: Tlb,
    allocator: FrameAllocator,
    store: S,
    page_buf: Vec<u8>,
    stats: Statistics,
}

impl<S: BackingStore> VmManager<S> {
    /// Build an engine using the replacement policy named in `config`.
    pub fn new(config: VmConfig, store: S) -> Result<Self, VmError> {
        Self::with_policy(config, store, config.policy.build())
    }

    /// Build an engine with a caller-supplied replacement policy.
    pub fn with_policy(
        config: VmConfig,
        store: S,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Result<Self, VmError> {
        config.validate()?;
        if store.page_size() != config.page_size {
            return Err(ConfigError::StorePageSize {
                page_size: config.page_size,
                store: store.page_size(),
            }
            .into());
        }

        let mut tlb = Tlb::new(config.tlb_capacity);
        tlb.flush();

        info!(
            "{} pages of {} bytes over {} frames, {}-entry TLB, {} replacement",
            config.page_table_size,
            store.page_size(),
            config.frame_count,
            tlb.capacity(),
            policy.name()
        );

        Ok(VmManager {
            memory: FrameStore::new(config.frame_count, config.frame_size),
            page_table: PageTable::new(config.page_table_size, config.frame_count),
            tlb,
            allocator: FrameAllocator::new(config.frame_count, policy),
            store,
            page_buf: vec![0u8; config.page_size],
            stats: Statistics::default(),
            config,
        })
    }

    /// Resolve one logical address to the byte stored behind it.
    ///
    /// # Errors
    /// The address is outside the address space, the backing store cannot
    /// supply the page, or memory is full with no way to reclaim a frame.
    /// All of these are fatal for the run.
    pub fn translate(&mut self, raw: u32) -> Result<Translation, VmError> {
        let address = LogicalAddress::decode(
            raw,
            self.config.offset_bits(),
            self.config.page_table_size,
        )?;

        let (frame, kind) = if let Some(frame) = self.tlb.lookup(address.page) {
            (frame, AccessKind::TlbHit)
        } else if let Some(frame) = self.page_table.lookup(address.page) {
            self.tlb.insert(address.page, frame);
            (frame, AccessKind::PageTableHit)
        } else {
            (self.service_fault(address.page)?, AccessKind::PageFault)
        };

        let translation = Translation {
            address,
            frame,
            physical_address: self.memory.physical_address(frame, address.offset),
            value: self.memory.read(frame, address.offset),
            kind,
        };
        self.stats.translations += 1;
        trace!("{address} -> frame {frame} ({kind}): {}", translation.value);

        Ok(translation)
    }

    /// Translate a sequence of addresses, stopping at the first fatal error
    pub fn translate_batch<I>(&mut self, addresses: I) -> Result<Vec<i8>, VmError>
    where
        I: IntoIterator<Item = u32>,
    {
        addresses
            .into_iter()
            .map(|raw| self.translate(raw).map(|t| t.value))
            .collect()
    }

    fn service_fault(&mut self, page: PageNumber) -> Result<FrameNumber, VmError> {
        self.stats.page_faults += 1;

        // Read before reclaiming so a failed read leaves every mapping intact.
        self.store.read_page(page, &mut self.page_buf)?;

        let allocation = self.allocator.allocate(&mut self.page_table, &mut self.tlb)?;
        let frame = allocation.frame;
        if let Some(evicted) = allocation.evicted {
            self.stats.evictions += 1;
            debug!("page {evicted} evicted from frame {frame}");
        }

        self.memory.load(frame, &self.page_buf);
        self.page_table.map(page, frame)?;
        self.tlb.insert(page, frame);
        debug!("page fault: page {page} loaded into frame {frame}");

        Ok(frame)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            tlb_hits: self.tlb.hits(),
            ..self.stats
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn memory(&self) -> &FrameStore {
        &self.memory
    }

    pub fn free_frames(&self) -> usize {
        self.allocator.free_count()
    }
}
