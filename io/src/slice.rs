use super::*;

/// An [`Input`] over an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceInput<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SliceInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }
}

impl Input for SliceInput<'_> {
    fn data(&self) -> &[u8] {
        &self.data[self.offset..]
    }

    fn input_size(&self) -> u64 {
        (self.data.len() - self.offset) as u64
    }

    fn require_input(&mut self, n: usize) -> Result<(), Error> {
        if self.data.len() - self.offset < n {
            Err(Error::EndOfStream)
        } else {
            Ok(())
        }
    }

    fn discard_buffered(&mut self, n: usize) {
        debug_assert!(n <= self.data.len() - self.offset);
        self.offset = (self.offset + n).min(self.data.len());
    }

    fn position(&self) -> u64 {
        self.offset as u64
    }

    fn bulk_read(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.require_input(dest.len())?;
        dest.copy_from_slice(&self.data[self.offset..self.offset + dest.len()]);
        self.offset += dest.len();
        Ok(())
    }
}

/// An [`Output`] into a fixed, caller-owned byte slice.
#[derive(Debug)]
pub struct SliceOutput<'a> {
    buf: &'a mut [u8],
    written: usize,
}

impl<'a> SliceOutput<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, written: 0 }
    }

    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.written]
    }
}

impl Output for SliceOutput<'_> {
    fn data(&mut self) -> &mut [u8] {
        &mut self.buf[self.written..]
    }

    fn size(&self) -> usize {
        self.buf.len() - self.written
    }

    fn ensure_size(&mut self, n: usize) -> Result<(), Error> {
        if self.size() < n {
            Err(Error::EndOfStream)
        } else {
            Ok(())
        }
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
