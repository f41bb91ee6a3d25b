use super::*;
use alloc::{string::String, vec::Vec};

pub use super::Error;

pub trait ToCbor {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error>;
}

/// Writes CBOR items to an [`Output`].
pub struct Encoder<O> {
    output: O,
}

impl Default for Encoder<VecOutput> {
    fn default() -> Self {
        Self::new(VecOutput::new())
    }
}

impl<O: Output> Encoder<O> {
    pub fn new(output: O) -> Self {
        Self { output }
    }

    pub fn build(self) -> O {
        self.output
    }

    pub fn output(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn emit_head(&mut self, major: Major, value: u64) -> Result<(), Error> {
        write_head(&mut self.output, major, value)
    }

    pub fn emit_simple(&mut self, value: u8) -> Result<(), Error> {
        write_simple(&mut self.output, value)
    }

    pub fn emit_raw_slice(&mut self, data: &[u8]) -> Result<(), Error> {
        self.output.bulk_write(data).map_err(Into::into)
    }

    /// Transcribe the next item of `input` verbatim.
    pub fn emit_item_from<I>(&mut self, input: &mut I, options: &DecodeOptions) -> Result<(), Error>
    where
        I: Input + ?Sized,
    {
        copy_item_to(input, &mut self.output, options)
    }

    fn emit_tags<I, T>(&mut self, tags: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: num_traits::ToPrimitive,
    {
        for tag in tags {
            let tag = tag.to_u64().ok_or(Error::ItemValueOutOfRange)?;
            self.emit_head(Major::Tag, tag)?;
        }
        Ok(())
    }

    pub fn emit<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    pub fn emit_tagged<T, I, U>(&mut self, value: &T, tags: I) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
        I: IntoIterator<Item = U>,
        U: num_traits::ToPrimitive,
    {
        self.emit_tags(tags)?;
        self.emit(value)
    }

    pub fn emit_byte_stream<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut ByteStream<O>) -> Result<(), Error>,
    {
        let mut s = ByteStream::new(self)?;
        f(&mut s)?;
        s.end()
    }

    pub fn emit_text_stream<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TextStream<O>) -> Result<(), Error>,
    {
        let mut s = TextStream::new(self)?;
        f(&mut s)?;
        s.end()
    }

    pub fn emit_array<F>(&mut self, count: Option<usize>, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Array<O>) -> Result<(), Error>,
    {
        let mut a = Array::new(self, count)?;
        f(&mut a)?;
        a.end()
    }

    pub fn emit_slice<T>(&mut self, values: &[T]) -> Result<(), Error>
    where
        T: ToCbor,
    {
        self.emit_array(Some(values.len()), |a| {
            for value in values {
                a.emit(value)?;
            }
            Ok(())
        })
    }

    pub fn emit_map<F>(&mut self, count: Option<usize>, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Map<O>) -> Result<(), Error>,
    {
        let mut m = Map::new(self, count)?;
        f(&mut m)?;
        m.end()
    }
}

/// The chunks of an indefinite-length byte string.
pub struct ByteStream<'a, O> {
    encoder: &'a mut Encoder<O>,
}

impl<'a, O: Output> ByteStream<'a, O> {
    fn new(encoder: &'a mut Encoder<O>) -> Result<Self, Error> {
        write_indefinite(&mut encoder.output, Major::Bytes)?;
        Ok(Self { encoder })
    }

    pub fn emit<V>(&mut self, chunk: &V) -> Result<(), Error>
    where
        V: AsRef<[u8]> + ?Sized,
    {
        self.encoder.emit(chunk.as_ref())
    }

    fn end(self) -> Result<(), Error> {
        write_break(&mut self.encoder.output)
    }
}

/// The chunks of an indefinite-length text string.
pub struct TextStream<'a, O> {
    encoder: &'a mut Encoder<O>,
}

impl<'a, O: Output> TextStream<'a, O> {
    fn new(encoder: &'a mut Encoder<O>) -> Result<Self, Error> {
        write_indefinite(&mut encoder.output, Major::Text)?;
        Ok(Self { encoder })
    }

    pub fn emit<V>(&mut self, chunk: &V) -> Result<(), Error>
    where
        V: AsRef<str> + ?Sized,
    {
        self.encoder.emit(chunk.as_ref())
    }

    fn end(self) -> Result<(), Error> {
        write_break(&mut self.encoder.output)
    }
}

/// An array (`D == 1`) or map (`D == 2`) being written.
///
/// A definite-length sequence fails with [`Error::ItemValueOutOfRange`] if
/// more or fewer than the declared number of items are emitted.
pub struct Sequence<'a, O, const D: usize> {
    encoder: &'a mut Encoder<O>,
    count: Option<usize>,
    idx: usize,
}

pub type Array<'a, O> = Sequence<'a, O, 1>;
pub type Map<'a, O> = Sequence<'a, O, 2>;

impl<'a, O: Output, const D: usize> Sequence<'a, O, D> {
    const MAJOR: Major = if D == 1 { Major::Array } else { Major::Map };

    fn new(encoder: &'a mut Encoder<O>, count: Option<usize>) -> Result<Self, Error> {
        let count = match count {
            Some(count) => {
                encoder.emit_head(Self::MAJOR, count as u64)?;
                Some(count.checked_mul(D).ok_or(Error::ItemValueOutOfRange)?)
            }
            None => {
                write_indefinite(&mut encoder.output, Self::MAJOR)?;
                None
            }
        };
        Ok(Self {
            encoder,
            count,
            idx: 0,
        })
    }

    fn next_field(&mut self) -> Result<&mut Encoder<O>, Error> {
        self.idx += 1;
        match self.count {
            Some(count) if self.idx > count => Err(Error::ItemValueOutOfRange),
            _ => Ok(&mut *self.encoder),
        }
    }

    fn end(self) -> Result<(), Error> {
        match self.count {
            None => write_break(&mut self.encoder.output),
            Some(count) if self.idx != count => Err(Error::ItemValueOutOfRange),
            Some(_) => Ok(()),
        }
    }

    pub fn emit<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
    {
        self.next_field()?.emit(value)
    }

    pub fn emit_tagged<T, I, U>(&mut self, value: &T, tags: I) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
        I: IntoIterator<Item = U>,
        U: num_traits::ToPrimitive,
    {
        self.next_field()?.emit_tagged(value, tags)
    }

    /// Emit a complete, already encoded item.
    pub fn emit_raw_slice(&mut self, data: &[u8]) -> Result<(), Error> {
        self.next_field()?.emit_raw_slice(data)
    }

    pub fn emit_item_from<I>(&mut self, input: &mut I, options: &DecodeOptions) -> Result<(), Error>
    where
        I: Input + ?Sized,
    {
        self.next_field()?.emit_item_from(input, options)
    }

    pub fn emit_byte_stream<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut ByteStream<O>) -> Result<(), Error>,
    {
        self.next_field()?.emit_byte_stream(f)
    }

    pub fn emit_text_stream<F>(&mut self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut TextStream<O>) -> Result<(), Error>,
    {
        self.next_field()?.emit_text_stream(f)
    }

    pub fn emit_array<F>(&mut self, count: Option<usize>, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Array<O>) -> Result<(), Error>,
    {
        self.next_field()?.emit_array(count, f)
    }

    pub fn emit_map<F>(&mut self, count: Option<usize>, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Map<O>) -> Result<(), Error>,
    {
        self.next_field()?.emit_map(count, f)
    }
}

macro_rules! impl_uint_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
                    encoder.emit_head(Major::Unsigned, *self as u64)
                }
            }
        )*
    };
}

impl_uint_to_cbor!(u8, u16, u32, u64, usize);

fn emit_i64<O: Output>(encoder: &mut Encoder<O>, val: i64) -> Result<(), Error> {
    // All ones for negative values: v ^ -1 == -1 - v, with no overflow at i64::MIN
    let sign = val >> 63;
    let major = Major::from_bits((sign & 1) as u8);
    encoder.emit_head(major, (val ^ sign) as u64)
}

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
                    emit_i64(encoder, *self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, isize);

impl ToCbor for f64 {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        write_float(&mut encoder.output, *self)
    }
}

impl ToCbor for f32 {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        write_float(&mut encoder.output, *self as f64)
    }
}

impl ToCbor for half::f16 {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        write_f16_bits(&mut encoder.output, self.to_bits())
    }
}

impl ToCbor for bool {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        encoder.emit_simple(if *self { special::TRUE } else { special::FALSE })
    }
}

impl ToCbor for str {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        encoder.emit_head(Major::Text, self.len() as u64)?;
        encoder.emit_raw_slice(self.as_bytes())
    }
}

impl ToCbor for String {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        self.as_str().to_cbor(encoder)
    }
}

impl ToCbor for [u8] {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        encoder.emit_head(Major::Bytes, self.len() as u64)?;
        encoder.emit_raw_slice(self)
    }
}

impl ToCbor for Vec<u8> {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        self.as_slice().to_cbor(encoder)
    }
}

impl<const N: usize> ToCbor for [u8; N] {
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        self.as_slice().to_cbor(encoder)
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
        match self {
            Some(value) => encoder.emit(value),
            None => encoder.emit_simple(special::UNDEFINED),
        }
    }
}

macro_rules! impl_array_to_cbor {
    ($( $value_type:ty),*) => {
        $(
            impl ToCbor for &[$value_type] {
                fn to_cbor<O: Output>(&self, encoder: &mut Encoder<O>) -> Result<(), Error> {
                    encoder.emit_slice(self)
                }
            }
        )*
    };
}

impl_array_to_cbor!(
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    half::f16,
    f32,
    f64,
    bool,
    String,
    Value
);

pub fn emit<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: ToCbor + ?Sized,
{
    let mut e = Encoder::default();
    e.emit(value)?;
    Ok(e.build().into_vec())
}

pub fn emit_tagged<T, I, U>(value: &T, tags: I) -> Result<Vec<u8>, Error>
where
    T: ToCbor + ?Sized,
    I: IntoIterator<Item = U>,
    U: num_traits::ToPrimitive,
{
    let mut e = Encoder::default();
    e.emit_tagged(value, tags)?;
    Ok(e.build().into_vec())
}

macro_rules! impl_stream_emit_functions {
    ($(( $method:ident, $stream_type:ident)),*) => {
        $(
            pub fn $method<F>(f: F) -> Result<Vec<u8>, Error>
            where
                F: FnOnce(&mut $stream_type<VecOutput>) -> Result<(), Error>,
            {
                let mut e = Encoder::default();
                e.$method(f)?;
                Ok(e.build().into_vec())
            }
        )*
    };
}

impl_stream_emit_functions!(
    (emit_byte_stream, ByteStream),
    (emit_text_stream, TextStream)
);

macro_rules! impl_collection_emit_functions {
    ($(( $method:ident, $collection_type:ident)),*) => {
        $(
            pub fn $method<F>(count: Option<usize>, f: F) -> Result<Vec<u8>, Error>
            where
                F: FnOnce(&mut $collection_type<VecOutput>) -> Result<(), Error>,
            {
                let mut e = Encoder::default();
                e.$method(count, f)?;
                Ok(e.build().into_vec())
            }
        )*
    };
}

impl_collection_emit_functions!((emit_array, Array), (emit_map, Map));
