use super::*;
use alloc::vec::Vec;

/// A growable in-memory [`Output`].
///
/// Growth is fallible: an allocation failure is reported as
/// [`Error::NotEnoughMemory`] rather than aborting.
#[derive(Debug, Default, Clone)]
pub struct VecOutput {
    buf: Vec<u8>,
    written: usize,
}

impl VecOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::new();
        buf.resize(capacity, 0);
        Self { buf, written: 0 }
    }

    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.written]
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.written);
        self.buf
    }
}

impl Output for VecOutput {
    fn data(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    fn size(&self) -> usize {
        self.buf.len() - self.written
    }

    fn ensure_size(&mut self, n: usize) -> Result<(), Error> {
        let available = self.size();
        if available >= n {
            return Ok(());
        }

        // Grow geometrically, never by less than a head's worth
        let additional = (n - available)
            .max(self.buf.len())
            .max(MIN_CONTIGUOUS_WRITE);
        self.buf
            .try_reserve(additional)
            .map_err(|_| Error::NotEnoughMemory)?;
        self.buf.resize(self.buf.len() + additional, 0);
        Ok(())
    }

    fn commit_written(&mut self, n: usize) {
        debug_assert!(n <= self.size());
        self.written = (self.written + n).min(self.buf.len());
    }

    fn bulk_write(&mut self, src: &[u8]) -> Result<(), Error> {
        self.ensure_size(src.len())?;
        self.buf[self.written..self.written + src.len()].copy_from_slice(src);
        self.written += src.len();
        Ok(())
    }
}
