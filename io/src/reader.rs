use super::*;
use alloc::vec::Vec;
use embedded_io::{Error as _, Read};

const DEFAULT_CAPACITY: usize = 4096;

/// An [`Input`] that refills a compacting buffer from an [`embedded_io::Read`].
///
/// The total stream length is unknown until the reader reports end of stream,
/// so [`Input::input_size`] is `u64::MAX` until then.
pub struct ReaderInput<R> {
    reader: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    eof: bool,
    consumed: u64,
}

impl<R: Read> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        let mut buf = Vec::new();
        buf.resize(capacity.max(MIN_CONTIGUOUS_WRITE), 0);
        Self {
            reader,
            buf,
            start: 0,
            end: 0,
            eof: false,
            consumed: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// True once the reader has reported end of stream and every resident
    /// byte has been consumed.
    pub fn at_end(&mut self) -> Result<bool, Error> {
        if self.start == self.end && !self.eof {
            self.fill(1)?;
        }
        Ok(self.start == self.end && self.eof)
    }

    fn fill(&mut self, n: usize) -> Result<(), Error> {
        if self.start + n > self.buf.len() {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;

            if n > self.buf.len() {
                let additional = n - self.buf.len();
                self.buf
                    .try_reserve(additional)
                    .map_err(|_| Error::NotEnoughMemory)?;
                self.buf.resize(n, 0);
            }
        }

        let read = self
            .reader
            .read(&mut self.buf[self.end..])
            .map_err(|e| Error::Io(e.kind()))?;
        if read == 0 {
            self.eof = true;
        } else {
            self.end += read;
        }
        Ok(())
    }
}

impl<R: Read> Input for ReaderInput<R> {
    fn data(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    fn input_size(&self) -> u64 {
        if self.eof {
            (self.end - self.start) as u64
        } else {
            u64::MAX
        }
    }

    fn require_input(&mut self, n: usize) -> Result<(), Error> {
        while self.end - self.start < n {
            if self.eof {
                return Err(Error::EndOfStream);
            }
            self.fill(n)?;
        }
        Ok(())
    }

    fn discard_buffered(&mut self, n: usize) {
        debug_assert!(n <= self.end - self.start);
        let n = n.min(self.end - self.start);
        self.start += n;
        self.consumed += n as u64;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }

    fn position(&self) -> u64 {
        self.consumed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Trickle<'a>(&'a [u8]);

    impl embedded_io::ErrorType for Trickle<'_> {
        type Error = core::convert::Infallible;
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let data = self.0;
            match (data.split_first(), buf.first_mut()) {
                (Some((b, rest)), Some(dest)) => {
                    *dest = *b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn refills_one_byte_at_a_time() {
        let mut input = ReaderInput::with_capacity(Trickle(&[1, 2, 3, 4, 5]), 4);
        assert_eq!(input.size(), 0);
        assert_eq!(input.input_size(), u64::MAX);

        input.require_input(3).unwrap();
        assert_eq!(input.data(), &[1, 2, 3]);
        input.discard_buffered(1);

        let mut dest = [0u8; 4];
        input.bulk_read(&mut dest).unwrap();
        assert_eq!(dest, [2, 3, 4, 5]);
        assert_eq!(input.position(), 5);

        assert_eq!(input.require_input(1), Err(Error::EndOfStream));
        assert_eq!(input.input_size(), 0);
        assert!(input.at_end().unwrap());
    }

    #[test]
    fn grows_for_large_requests() {
        let data = [7u8; 40];
        let mut input = ReaderInput::with_capacity(Trickle(&data), 16);
        input.require_input(40).unwrap();
        assert_eq!(input.size(), 40);
        assert_eq!(input.require_input(41), Err(Error::EndOfStream));
    }
}
