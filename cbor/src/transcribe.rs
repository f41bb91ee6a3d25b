/*!
Structural transcription: copy or skip one complete item without decoding it.

Nesting is tracked on an explicit stack of frames, so the native call
stack is never used per nesting level. Payload bytes are moved in
resident-sized pieces, so auxiliary memory depends only on nesting depth.

Errors are those of the head decoder and the chunk checks, unchanged. A
reserved additional information value (28 to 30, or 31 on an integer or tag)
surfaces as [`Error::InvalidAdditionalInformation`] at any depth; a break
where no indefinite item is open, or one that leaves a map value owed, is
[`Error::ItemTypeMismatch`].
*/

use super::*;
use chunked::{check_available, check_chunk, check_items};
use smallvec::SmallVec;

const INLINE_FRAMES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    major: Major,
    indefinite: bool,
    // Elements (array), key and value slots (map) or bytes (string) still owed
    remaining: u64,
    // Set while a map value is owed
    parity: bool,
}

trait Sink {
    fn head(&mut self, bytes: &[u8]) -> Result<(), Error>;
    fn payload(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

struct Discard;

impl Sink for Discard {
    fn head(&mut self, _bytes: &[u8]) -> Result<(), Error> {
        Ok(())
    }

    fn payload(&mut self, _bytes: &[u8]) -> Result<(), Error> {
        Ok(())
    }
}

struct CopyTo<'a, O: ?Sized>(&'a mut O);

impl<O: Output + ?Sized> Sink for CopyTo<'_, O> {
    fn head(&mut self, bytes: &[u8]) -> Result<(), Error> {
        // Heads never exceed MIN_CONTIGUOUS_WRITE
        head::write_raw_head(self.0, bytes)
    }

    fn payload(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.0.bulk_write(bytes).map_err(Into::into)
    }
}

/// Move `len` payload bytes from `input` to `sink`, a resident window at a time.
fn transfer<I, S>(input: &mut I, sink: &mut S, mut len: u64) -> Result<(), Error>
where
    I: Input + ?Sized,
    S: Sink,
{
    while len > 0 {
        if input.size() == 0 {
            input.require_input(1)?;
        }
        let n = (input.size() as u64).min(len) as usize;
        sink.payload(&input.data()[..n])?;
        input.discard_buffered(n);
        len -= n as u64;
    }
    Ok(())
}

/// Copies or skips single items, reusing its frame stack between calls.
///
/// A `Transcriber` serves one call at a time; give each concurrent
/// operation its own.
#[derive(Debug, Default)]
pub struct Transcriber {
    stack: SmallVec<[Frame; INLINE_FRAMES]>,
    options: DecodeOptions,
}

impl Transcriber {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            stack: SmallVec::new(),
            options,
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Copy the exact encoded bytes of the next item from `input` to `output`.
    pub fn copy_item<I, O>(&mut self, input: &mut I, output: &mut O) -> Result<(), Error>
    where
        I: Input + ?Sized,
        O: Output + ?Sized,
    {
        self.run(input, &mut CopyTo(output))
    }

    /// Consume the next item from `input`, leaving it positioned just past it.
    pub fn skip_item<I>(&mut self, input: &mut I) -> Result<(), Error>
    where
        I: Input + ?Sized,
    {
        self.run(input, &mut Discard)
    }

    fn run<I, S>(&mut self, input: &mut I, sink: &mut S) -> Result<(), Error>
    where
        I: Input + ?Sized,
        S: Sink,
    {
        self.stack.clear();
        let r = self.walk(input, sink);
        self.stack.clear();
        r
    }

    fn take_head<I, S>(&self, input: &mut I, sink: &mut S) -> Result<Head, Error>
    where
        I: Input + ?Sized,
        S: Sink,
    {
        let head = peek_head(input, self.options.mode)?;
        let len = head.encoded_length as usize;
        sink.head(&input.data()[..len])?;
        input.discard_buffered(len);
        Ok(head)
    }

    fn frame<I: Input + ?Sized>(&self, input: &I, head: &Head) -> Result<Frame, Error> {
        let mut remaining = head.value;
        if !head.indefinite {
            match head.major {
                Major::Array => {
                    check_available(input, Major::Array, head.value)?;
                    check_items(head.value, &self.options)?;
                }
                Major::Map => {
                    check_available(input, Major::Map, head.value)?;
                    check_items(head.value, &self.options)?;
                    remaining = head.value.checked_mul(2).ok_or(Error::MissingData)?;
                }
                _ => {}
            }
        }
        Ok(Frame {
            major: head.major,
            indefinite: head.indefinite,
            remaining,
            parity: false,
        })
    }

    fn push(&mut self, frame: Frame) -> Result<(), Error> {
        self.stack
            .try_reserve(1)
            .map_err(|_| Error::NotEnoughMemory)?;
        self.stack.push(frame);
        Ok(())
    }

    fn transfer_string<I, S>(&self, input: &mut I, sink: &mut S, frame: &Frame) -> Result<(), Error>
    where
        I: Input + ?Sized,
        S: Sink,
    {
        if !frame.indefinite {
            check_chunk(input, frame.remaining, 0, &self.options)?;
            return transfer(input, sink, frame.remaining);
        }

        let mut total = 0;
        loop {
            let chunk = self.take_head(input, sink)?;
            if chunk.is_break() {
                return Ok(());
            }
            if chunk.major != frame.major || chunk.indefinite {
                return Err(Error::InvalidIndefiniteSubitem);
            }
            total = check_chunk(input, chunk.value, total, &self.options)?;
            transfer(input, sink, chunk.value)?;
        }
    }

    fn walk<I, S>(&mut self, input: &mut I, sink: &mut S) -> Result<(), Error>
    where
        I: Input + ?Sized,
        S: Sink,
    {
        let head = self.take_head(input, sink)?;
        let frame = self.frame(input, &head)?;
        self.push(frame)?;

        while let Some(top) = self.stack.last_mut() {
            match top.major {
                Major::Unsigned | Major::Negative => {
                    self.stack.pop();
                }
                Major::Special => {
                    // A break outside of an indefinite container
                    if top.indefinite {
                        return Err(Error::ItemTypeMismatch);
                    }
                    self.stack.pop();
                }
                Major::Bytes | Major::Text => {
                    let frame = *top;
                    self.stack.pop();
                    self.transfer_string(input, sink, &frame)?;
                }
                Major::Array | Major::Map => {
                    if !top.indefinite && top.remaining == 0 {
                        self.stack.pop();
                        continue;
                    }
                    if top.indefinite && at_break(input)? {
                        if top.parity {
                            return Err(Error::ItemTypeMismatch);
                        }
                        sink.head(&[BREAK])?;
                        input.discard_buffered(1);
                        self.stack.pop();
                        continue;
                    }
                    if !top.indefinite {
                        top.remaining -= 1;
                    }
                    if top.major == Major::Map {
                        top.parity = !top.parity;
                    }

                    let head = self.take_head(input, sink)?;
                    let frame = self.frame(input, &head)?;
                    self.push(frame)?;
                }
                Major::Tag => {
                    // A tag wraps exactly one item and takes no slot of its own
                    let head = self.take_head(input, sink)?;
                    let frame = self.frame(input, &head)?;
                    if let Some(top) = self.stack.last_mut() {
                        *top = frame;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Copy the exact encoded bytes of the next item from `input` to `output`.
pub fn copy_item_to<I, O>(input: &mut I, output: &mut O, options: &DecodeOptions) -> Result<(), Error>
where
    I: Input + ?Sized,
    O: Output + ?Sized,
{
    Transcriber::new(*options).copy_item(input, output)
}

/// Consume the next item from `input` without decoding it.
pub fn skip_item<I>(input: &mut I, options: &DecodeOptions) -> Result<(), Error>
where
    I: Input + ?Sized,
{
    Transcriber::new(*options).skip_item(input)
}

/// The encoded length of the first item in `data`.
pub fn item_length(data: &[u8], options: &DecodeOptions) -> Result<usize, Error> {
    let mut input = SliceInput::new(data);
    skip_item(&mut input, options)?;
    Ok(input.offset())
}
