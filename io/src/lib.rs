#![no_std]
extern crate alloc;

mod reader;
mod slice;
mod vec;
mod writer;

pub use embedded_io::ErrorKind;
pub use reader::ReaderInput;
pub use slice::{SliceInput, SliceOutput};
pub use vec::VecOutput;
pub use writer::WriterOutput;

use thiserror::Error;

/// The smallest contiguous region every [`Output`] must be able to provide
/// after a successful [`Output::ensure_size`]. No CBOR item head exceeds this.
pub const MIN_CONTIGUOUS_WRITE: usize = 16;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("End of stream")]
    EndOfStream,

    #[error("Not enough memory")]
    NotEnoughMemory,

    #[error("I/O error: {0:?}")]
    Io(ErrorKind),
}

/// A source of bytes consumed in place.
///
/// The resident window returned by [`Input::data`] is always contiguous.
pub trait Input {
    /// The bytes currently resident, starting at the read cursor.
    fn data(&self) -> &[u8];

    /// Number of resident bytes.
    fn size(&self) -> usize {
        self.data().len()
    }

    /// Total bytes left in the logical stream, resident or not.
    ///
    /// Sources that cannot know their length report `u64::MAX` until the
    /// end of the stream has been observed.
    fn input_size(&self) -> u64;

    /// Make at least `n` bytes resident, refilling from the underlying source.
    fn require_input(&mut self, n: usize) -> Result<(), Error>;

    /// Advance the read cursor by `n` resident bytes.
    fn discard_buffered(&mut self, n: usize);

    /// Total bytes consumed since the input was created.
    fn position(&self) -> u64;

    /// Copy `dest.len()` bytes out and advance past them.
    fn bulk_read(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        let mut filled = 0;
        while filled < dest.len() {
            if self.size() == 0 {
                self.require_input(1)?;
            }
            let n = self.size().min(dest.len() - filled);
            dest[filled..filled + n].copy_from_slice(&self.data()[..n]);
            self.discard_buffered(n);
            filled += n;
        }
        Ok(())
    }
}

/// A sink of bytes written in place.
pub trait Output {
    /// The writable region starting at the write cursor.
    fn data(&mut self) -> &mut [u8];

    /// Number of writable contiguous bytes.
    fn size(&self) -> usize;

    /// Grow or flush until at least `n` contiguous bytes are writable.
    fn ensure_size(&mut self, n: usize) -> Result<(), Error>;

    /// Advance the write cursor past `n` bytes written into [`Output::data`].
    fn commit_written(&mut self, n: usize);

    /// Copy `src` into the sink and advance past it.
    fn bulk_write(&mut self, mut src: &[u8]) -> Result<(), Error> {
        while !src.is_empty() {
            self.ensure_size(src.len().min(MIN_CONTIGUOUS_WRITE))?;
            let n = self.size().min(src.len());
            self.data()[..n].copy_from_slice(&src[..n]);
            self.commit_written(n);
            src = &src[n..];
        }
        Ok(())
    }
}

impl<I: Input + ?Sized> Input for &mut I {
    fn data(&self) -> &[u8] {
        (**self).data()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn input_size(&self) -> u64 {
        (**self).input_size()
    }

    fn require_input(&mut self, n: usize) -> Result<(), Error> {
        (**self).require_input(n)
    }

    fn discard_buffered(&mut self, n: usize) {
        (**self).discard_buffered(n)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn bulk_read(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        (**self).bulk_read(dest)
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn data(&mut self) -> &mut [u8] {
        (**self).data()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn ensure_size(&mut self, n: usize) -> Result<(), Error> {
        (**self).ensure_size(n)
    }

    fn commit_written(&mut self, n: usize) {
        (**self).commit_written(n)
    }

    fn bulk_write(&mut self, src: &[u8]) -> Result<(), Error> {
        (**self).bulk_write(src)
    }
}
