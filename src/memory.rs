use crate::constants::FrameNumber;

/// Simulated physical memory: a fixed number of equally sized frames.
pub struct FrameStore {
    frames: Vec<Box<[u8]>>,
    frame_size: usize,
}

impl FrameStore {
    /// Create physical memory with every frame zeroed
    pub fn new(frame_count: usize, frame_size: usize) -> Self {
        let frames = (0..frame_count)
            .map(|_| vec![0u8; frame_size].into_boxed_slice())
            .collect();
        FrameStore { frames, frame_size }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Read the signed byte at `offset` within `frame`
    #[inline]
    pub fn read(&self, frame: FrameNumber, offset: usize) -> i8 {
        self.frames[frame][offset] as i8
    }

    /// Write a single byte at `offset` within `frame`
    #[inline]
    pub fn write(&mut self, frame: FrameNumber, offset: usize, value: i8) {
        self.frames[frame][offset] = value as u8;
    }

    /// Overwrite a whole frame with a page image.
    ///
    /// # Panics
    /// If `page` is not exactly one frame long.
    pub fn load(&mut self, frame: FrameNumber, page: &[u8]) {
        self.frames[frame].copy_from_slice(page);
    }

    /// Contents of one frame
    pub fn frame(&self, frame: FrameNumber) -> &[u8] {
        &self.frames[frame]
    }

    /// Flat physical address of a byte, the way hardware would see it.
    #[inline]
    pub fn physical_address(&self, frame: FrameNumber, offset: usize) -> usize {
        frame * self.frame_size + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_store_initialization() {
        let store = FrameStore::new(4, 256);
        assert_eq!(store.frame_count(), 4);
        assert_eq!(store.frame_size(), 256);
        assert_eq!(store.read(0, 0), 0);
        assert_eq!(store.read(3, 255), 0);
    }

    #[test]
    fn test_read_write_signed() {
        let mut store = FrameStore::new(2, 16);
        store.write(1, 3, 42);
        assert_eq!(store.read(1, 3), 42);

        store.write(1, 3, -7);
        assert_eq!(store.read(1, 3), -7);
        assert_eq!(store.frame(1)[3], 0xF9);

        // neighbours untouched
        assert_eq!(store.read(0, 3), 0);
        assert_eq!(store.read(1, 2), 0);
    }

    #[test]
    fn test_load_whole_frame() {
        let mut store = FrameStore::new(3, 4);
        store.load(2, &[1, 2, 0x80, 0xFF]);
        assert_eq!(store.frame(2), &[1, 2, 0x80, 0xFF]);
        assert_eq!(store.read(2, 2), -128);
        assert_eq!(store.read(2, 3), -1);
        assert_eq!(store.frame(1), &[0, 0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn test_load_rejects_wrong_length() {
        let mut store = FrameStore::new(1, 4);
        store.load(0, &[1, 2, 3]);
    }

    #[test]
    fn test_frame_boundaries_do_not_overlap() {
        let mut store = FrameStore::new(2, 256);
        store.load(0, &[7u8; 256]);
        store.load(1, &[9u8; 256]);
        assert_eq!(store.read(0, 255), 7);
        assert_eq!(store.read(1, 0), 9);
    }

    #[test]
    fn test_physical_address() {
        let store = FrameStore::new(64, 256);
        assert_eq!(store.physical_address(0, 0), 0);
        assert_eq!(store.physical_address(1, 0), 256);
        assert_eq!(store.physical_address(4, 10), 1034);
        assert_eq!(store.physical_address(63, 255), 64 * 256 - 1);
    }
}
