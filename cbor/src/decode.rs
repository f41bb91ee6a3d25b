use super::*;
use alloc::{string::String, vec::Vec};

pub use super::Error;

/// Types that can be decoded from a single CBOR item.
pub trait FromCbor: Sized {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error>;
}

/// Decode the first item of `data` with the default (lenient) options.
pub fn parse<T>(data: &[u8]) -> Result<T, Error>
where
    T: FromCbor,
{
    parse_with(data, &DecodeOptions::default()).map(|(v, _)| v)
}

/// Decode the first item of `data`, returning it with its encoded length.
pub fn parse_with<T>(data: &[u8], options: &DecodeOptions) -> Result<(T, usize), Error>
where
    T: FromCbor,
{
    let mut input = SliceInput::new(data);
    let v = T::from_cbor(&mut input, options)?;
    Ok((v, input.offset()))
}

/// Decode every item of a CBOR sequence (RFC 8742).
pub fn parse_sequence<T>(data: &[u8], options: &DecodeOptions) -> Result<Vec<T>, Error>
where
    T: FromCbor,
{
    let mut input = SliceInput::new(data);
    let mut items = Vec::new();
    while !input.is_empty() {
        items.push(T::from_cbor(&mut input, options)?);
    }
    Ok(items)
}

fn read_typed_head<I: Input + ?Sized>(
    input: &mut I,
    options: &DecodeOptions,
    major: Major,
) -> Result<Head, Error> {
    let head = read_head(input, options.mode)?;
    if head.major != major || head.indefinite {
        return Err(Error::ItemTypeMismatch);
    }
    Ok(head)
}

macro_rules! impl_uint_from_cbor {
    ($($ty:ty),*) => {
        $(
            impl FromCbor for $ty {
                fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
                    let head = read_typed_head(input, options, Major::Unsigned)?;
                    <$ty>::try_from(head.value).map_err(|_| Error::ItemValueOutOfRange)
                }
            }
        )*
    };
}

impl_uint_from_cbor!(u8, u16, u32, u64, usize);

macro_rules! impl_int_from_cbor {
    ($($ty:ty),*) => {
        $(
            impl FromCbor for $ty {
                fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
                    let v = read_head(input, options.mode)?.signed()?;
                    <$ty>::try_from(v).map_err(|_| Error::ItemValueOutOfRange)
                }
            }
        )*
    };
}

impl_int_from_cbor!(i8, i16, i32, i64, isize);

impl FromCbor for bool {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        match read_head(input, options.mode)?.simple() {
            Some(special::FALSE) => Ok(false),
            Some(special::TRUE) => Ok(true),
            _ => Err(Error::ItemTypeMismatch),
        }
    }
}

impl FromCbor for f64 {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        read_head(input, options.mode)?
            .as_f64()
            .ok_or(Error::ItemTypeMismatch)
    }
}

impl FromCbor for f32 {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        let v = f64::from_cbor(input, options)?;
        if v.is_nan() {
            Ok(f32::NAN)
        } else {
            head::narrow_f32(v).ok_or(Error::ItemValueOutOfRange)
        }
    }
}

impl FromCbor for String {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        read_text(input, options)
    }
}

impl FromCbor for Vec<u8> {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        read_bytes(input, options)
    }
}

impl<T> FromCbor for Option<T>
where
    T: FromCbor,
{
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        let head = peek_head(input, options.mode)?;
        if matches!(head.simple(), Some(special::NULL | special::UNDEFINED)) {
            input.discard_buffered(head.encoded_length as usize);
            Ok(None)
        } else {
            T::from_cbor(input, options).map(Some)
        }
    }
}
