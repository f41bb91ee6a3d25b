use super::*;
use alloc::vec::Vec;
use embedded_io::{Error as _, Write};

const DEFAULT_CAPACITY: usize = 4096;

/// An [`Output`] that buffers writes and flushes them to an [`embedded_io::Write`].
///
/// Call [`WriterOutput::finish`] to push any buffered bytes through.
pub struct WriterOutput<W> {
    writer: W,
    buf: Vec<u8>,
    filled: usize,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        let mut buf = Vec::new();
        buf.resize(capacity.max(MIN_CONTIGUOUS_WRITE), 0);
        Self {
            writer,
            buf,
            filled: 0,
        }
    }

    pub fn finish(mut self) -> Result<W, Error> {
        self.flush_buffer()?;
        self.writer.flush().map_err(|e| Error::Io(e.kind()))?;
        Ok(self.writer)
    }

    fn write_through(&mut self, mut data: &[u8]) -> Result<(), Error> {
        while !data.is_empty() {
            match self.writer.write(data).map_err(|e| Error::Io(e.kind()))? {
                0 => return Err(Error::EndOfStream),
                n => data = &data[n..],
            }
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<(), Error> {
        let mut offset = 0;
        while offset < self.filled {
            match self
                .writer
                .write(&self.buf[offset..self.filled])
                .map_err(|e| Error::Io(e.kind()))?
            {
                0 => return Err(Error::EndOfStream),
                n => offset += n,
            }
        }
        self.filled = 0;
        Ok(())
    }
}

impl<W: Write> Output for WriterOutput<W> {
    fn data(&mut self) -> &mut [u8] {
        &mut self.buf[self.filled..]
    }

    fn size(&self) -> usize {
        self.buf.len() - self.filled
    }

    fn ensure_size(&mut self, n: usize) -> Result<(), Error> {
        if self.size() >= n {
            return Ok(());
        }
        self.flush_buffer()?;
        if self.buf.len() < n {
            self.buf
                .try_reserve(n - self.buf.len())
                .map_err(|_| Error::NotEnoughMemory)?;
            self.buf.resize(n, 0);
        }
        Ok(())
    }

    fn commit_written(&mut self, n: usize) {
        debug_assert!(n <= self.size());
        self.filled = (self.filled + n).min(self.buf.len());
    }

    fn bulk_write(&mut self, src: &[u8]) -> Result<(), Error> {
        if src.len() <= self.size() {
            self.buf[self.filled..self.filled + src.len()].copy_from_slice(src);
            self.filled += src.len();
            Ok(())
        } else {
            self.flush_buffer()?;
            self.write_through(src)
        }
    }
}
