use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::PageNumber;
use crate::error::VmError;

/// Secondary storage holding every logical page, read one page at a time.
pub trait BackingStore {
    /// Size in bytes of one stored page
    fn page_size(&self) -> usize;

    /// Fill `buf` with page `page`. `buf` is exactly one page long.
    ///
    /// # Errors
    /// The page cannot be located or is not fully present.
    fn read_page(&mut self, page: PageNumber, buf: &mut [u8]) -> Result<(), VmError>;
}

/// Backing store over any seekable byte source; page `n` starts at byte
/// `n * page_size`.
pub struct SeekBackingStore<R> {
    inner: R,
    page_size: usize,
}

pub type FileBackingStore = SeekBackingStore<BufReader<File>>;

impl<R: Read + Seek> SeekBackingStore<R> {
    pub fn new(inner: R, page_size: usize) -> Self {
        SeekBackingStore { inner, page_size }
    }
}

impl FileBackingStore {
    pub fn open<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Self, VmError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), page_size))
    }
}

impl<R: Read + Seek> BackingStore for SeekBackingStore<R> {
    fn page_size(&self) -> usize {
        self.page_size
    }

    fn read_page(&mut self, page: PageNumber, buf: &mut [u8]) -> Result<(), VmError> {
        debug_assert_eq!(buf.len(), self.page_size);
        let start = (page * self.page_size) as u64;
        self.inner
            .seek(SeekFrom::Start(start))
            .map_err(|source| VmError::BackingStoreSeek { page, source })?;
        self.inner
            .read_exact(buf)
            .map_err(|source| VmError::BackingStoreRead { page, source })
    }
}
