/*!
Primitive item codec: one item head and its inline scalar payload.
*/

use super::*;

/// The longest possible item head: one initial byte plus an 8 byte argument.
pub const MAX_HEAD_LENGTH: usize = 9;

/// The universal indefinite-length terminator.
pub const BREAK: u8 = 0xFF;

/// Reserved additional information values of [`Major::Special`].
pub mod special {
    pub const FALSE: u8 = 20;
    pub const TRUE: u8 = 21;
    pub const NULL: u8 = 22;
    pub const UNDEFINED: u8 = 23;
    pub const SIMPLE_VALUE: u8 = 24;
    pub const HALF_FLOAT: u8 = 25;
    pub const SINGLE_FLOAT: u8 = 26;
    pub const DOUBLE_FLOAT: u8 = 27;
    pub const BREAK: u8 = 31;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Major {
    Unsigned = 0,
    Negative = 1,
    Bytes = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tag = 6,
    Special = 7,
}

impl Major {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 7 {
            0 => Self::Unsigned,
            1 => Self::Negative,
            2 => Self::Bytes,
            3 => Self::Text,
            4 => Self::Array,
            5 => Self::Map,
            6 => Self::Tag,
            _ => Self::Special,
        }
    }

    /// The major type positioned in bits 7-5 of an initial byte.
    pub const fn initial_bits(self) -> u8 {
        (self as u8) << 5
    }

    pub const fn allows_indefinite(self) -> bool {
        matches!(
            self,
            Self::Bytes | Self::Text | Self::Array | Self::Map | Self::Special
        )
    }
}

/// A decoded item head.
///
/// `value` is the integer magnitude, length, count or tag number, the simple
/// value, or the raw IEEE bit pattern of a float, right-justified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub major: Major,
    pub indefinite: bool,
    pub encoded_length: u32,
    pub value: u64,
}

impl Head {
    fn definite(major: Major, value: u64, encoded_length: u32) -> Self {
        Self {
            major,
            indefinite: false,
            encoded_length,
            value,
        }
    }

    fn indefinite(major: Major) -> Result<Self, Error> {
        if !major.allows_indefinite() {
            return Err(Error::InvalidAdditionalInformation(special::BREAK));
        }
        Ok(Self {
            major,
            indefinite: true,
            encoded_length: 1,
            value: 0,
        })
    }

    pub fn is_break(&self) -> bool {
        self.major == Major::Special && self.indefinite
    }

    /// The additional information field this head was decoded from.
    pub fn additional_information(&self) -> u8 {
        match (self.indefinite, self.encoded_length) {
            (true, _) => special::BREAK,
            (false, 1) => self.value as u8,
            (false, 2) => 24,
            (false, 3) => 25,
            (false, 5) => 26,
            _ => 27,
        }
    }

    /// True if the argument uses the narrowest width able to hold it.
    ///
    /// Floats are exempt; their width is part of their value. A two-byte
    /// simple value below 32 is never minimal.
    pub fn is_minimal(&self) -> bool {
        match self.major {
            Major::Special => self.encoded_length != 2 || self.value >= 32,
            _ => self.indefinite || self.encoded_length == minimal_length(self.value),
        }
    }

    /// True unless this is a float that survives narrowing to a smaller width.
    pub fn is_shortest_float(&self) -> bool {
        match (self.major, self.encoded_length) {
            (Major::Special, 5) => {
                let f = f32::from_bits(self.value as u32) as f64;
                !f.is_nan() && narrow_f16(f).is_none()
            }
            (Major::Special, 9) => {
                let f = f64::from_bits(self.value);
                !f.is_nan() && narrow_f32(f).is_none()
            }
            _ => true,
        }
    }

    /// Unfold an integer head into its signed value.
    pub fn signed(&self) -> Result<i64, Error> {
        if !matches!(self.major, Major::Unsigned | Major::Negative) {
            return Err(Error::ItemTypeMismatch);
        }
        let magnitude = i64::try_from(self.value).map_err(|_| Error::ItemValueOutOfRange)?;

        // All ones for negative, zero for unsigned: m ^ -1 == -1 - m
        let sign = -((self.major as i64) & 1);
        Ok(magnitude ^ sign)
    }

    /// As [`Head::signed`], but total over the whole CBOR integer range.
    pub fn signed_wide(&self) -> Option<i128> {
        if !matches!(self.major, Major::Unsigned | Major::Negative) {
            return None;
        }
        let sign = -((self.major as i128) & 1);
        Some((self.value as i128) ^ sign)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match (self.major, self.indefinite, self.encoded_length) {
            (Major::Special, false, 3) => Some(half_to_f64(self.value as u16)),
            (Major::Special, false, 5) => Some(f32::from_bits(self.value as u32) as f64),
            (Major::Special, false, 9) => Some(f64::from_bits(self.value)),
            _ => None,
        }
    }

    /// The simple value of a non-float [`Major::Special`] head.
    pub fn simple(&self) -> Option<u8> {
        match (self.major, self.indefinite, self.encoded_length) {
            (Major::Special, false, 1 | 2) => Some(self.value as u8),
            _ => None,
        }
    }
}

pub(crate) fn minimal_length(value: u64) -> u32 {
    if value < 24 {
        1
    } else if value <= u8::MAX as u64 {
        2
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Total head length implied by an initial byte, or 1 if the byte is invalid.
fn head_length(initial: u8) -> usize {
    match initial & 0x1F {
        info @ 24..=27 => 1 + (1 << (info - 24)),
        _ => 1,
    }
}

/// Decode a head from a window holding at least the complete head.
pub fn decode_head(window: &[u8]) -> Result<Head, Error> {
    let Some(&initial) = window.first() else {
        return Err(Error::MissingData);
    };
    let major = Major::from_bits(initial >> 5);
    match initial & 0x1F {
        info @ 0..=23 => Ok(Head::definite(major, info as u64, 1)),
        info @ 24..=27 => {
            let width = 1usize << (info - 24);
            let Some(arg) = window.get(1..=width) else {
                return Err(Error::MissingData);
            };
            let mut buf = [0u8; 8];
            buf[8 - width..].copy_from_slice(arg);
            Ok(Head::definite(
                major,
                u64::from_be_bytes(buf),
                1 + width as u32,
            ))
        }
        special::BREAK => Head::indefinite(major),
        info => Err(Error::InvalidAdditionalInformation(info)),
    }
}

/// Decode a head from a full 9 byte window without per-field bounds checks.
///
/// The whole window is read regardless of the head's true length; callers
/// advance by [`Head::encoded_length`] afterwards.
pub fn decode_head_speculative(window: &[u8; MAX_HEAD_LENGTH]) -> Result<Head, Error> {
    let [initial, arg @ ..] = *window;
    let major = Major::from_bits(initial >> 5);
    match initial & 0x1F {
        info @ 0..=23 => Ok(Head::definite(major, info as u64, 1)),
        info @ 24..=27 => {
            let width = 1u32 << (info - 24);
            let value = u64::from_be_bytes(arg) >> (64 - 8 * width);
            Ok(Head::definite(major, value, 1 + width))
        }
        special::BREAK => Head::indefinite(major),
        info => Err(Error::InvalidAdditionalInformation(info)),
    }
}

fn peek_head_safe<I: Input + ?Sized>(input: &mut I) -> Result<Head, Error> {
    input.require_input(1)?;
    let len = head_length(input.data()[0]);
    input.require_input(len)?;
    decode_head(&input.data()[..len])
}

/// Enforce `mode` on a decoded head.
pub fn check_mode(head: &Head, mode: ParseMode) -> Result<(), Error> {
    if mode == ParseMode::Lenient {
        return Ok(());
    }
    if head.indefinite {
        // A break is only reachable inside an indefinite item, which the
        // caller will already have rejected
        return if head.major == Major::Special {
            Ok(())
        } else {
            Err(Error::IndefiniteItem)
        };
    }
    if !head.is_minimal() || (mode == ParseMode::Strict && !head.is_shortest_float()) {
        return Err(Error::OversizedAdditionalInformationCoding);
    }
    Ok(())
}

/// Decode the next head without consuming it.
///
/// On return at least [`Head::encoded_length`] bytes are resident.
pub fn peek_head<I: Input + ?Sized>(input: &mut I, mode: ParseMode) -> Result<Head, Error> {
    let head = match input.data().first_chunk::<MAX_HEAD_LENGTH>() {
        Some(window) => decode_head_speculative(window)?,
        None => peek_head_safe(input)?,
    };
    check_mode(&head, mode)?;
    Ok(head)
}

/// Decode and consume the next head.
pub fn read_head<I: Input + ?Sized>(input: &mut I, mode: ParseMode) -> Result<Head, Error> {
    let head = peek_head(input, mode)?;
    input.discard_buffered(head.encoded_length as usize);
    Ok(head)
}

/// True if the next byte is a break; nothing is consumed.
pub(crate) fn at_break<I: Input + ?Sized>(input: &mut I) -> Result<bool, Error> {
    input.require_input(1)?;
    Ok(input.data()[0] == BREAK)
}

fn pow2(exp: i32) -> f64 {
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// Expand an IEEE-754 binary16 bit pattern.
pub fn half_to_f64(bits: u16) -> f64 {
    let exp = (bits >> 10) & 0x1F;
    let frac = (bits & 0x3FF) as f64;
    let magnitude = match exp {
        0 => frac * pow2(-24),
        31 if frac == 0.0 => f64::INFINITY,
        31 => f64::NAN,
        _ => (frac + 1024.0) * pow2(exp as i32 - 25),
    };
    if bits & 0x8000 != 0 {
        -magnitude
    } else {
        magnitude
    }
}

fn lossless_float_coerce<T>(value: f64) -> Option<T>
where
    T: num_traits::FromPrimitive + Into<f64> + Copy,
{
    match <T as num_traits::FromPrimitive>::from_f64(value) {
        Some(f) if <T as Into<f64>>::into(f) == value => Some(f),
        _ => None,
    }
}

pub(crate) fn narrow_f16(value: f64) -> Option<half::f16> {
    lossless_float_coerce::<half::f16>(value)
}

pub(crate) fn narrow_f32(value: f64) -> Option<f32> {
    lossless_float_coerce::<f32>(value)
}

/// Encode a head with the narrowest argument width able to hold `value`.
pub fn encode_head(major: Major, value: u64) -> ([u8; MAX_HEAD_LENGTH], usize) {
    let mut buf = [0u8; MAX_HEAD_LENGTH];
    let len = minimal_length(value) as usize;
    buf[0] = major.initial_bits()
        | match len {
            1 => value as u8,
            2 => 24,
            3 => 25,
            5 => 26,
            _ => 27,
        };
    buf[1..len].copy_from_slice(&value.to_be_bytes()[9 - len..]);
    (buf, len)
}

pub(crate) fn write_raw_head<O: Output + ?Sized>(output: &mut O, head: &[u8]) -> Result<(), Error> {
    output.ensure_size(head.len())?;
    output.data()[..head.len()].copy_from_slice(head);
    output.commit_written(head.len());
    Ok(())
}

pub fn write_head<O: Output + ?Sized>(output: &mut O, major: Major, value: u64) -> Result<(), Error> {
    let (buf, len) = encode_head(major, value);
    write_raw_head(output, &buf[..len])
}

/// Open an indefinite-length byte string, text string, array or map.
pub fn write_indefinite<O: Output + ?Sized>(output: &mut O, major: Major) -> Result<(), Error> {
    match major {
        Major::Bytes | Major::Text | Major::Array | Major::Map => {
            write_raw_head(output, &[major.initial_bits() | special::BREAK])
        }
        _ => Err(Error::ItemTypeMismatch),
    }
}

pub fn write_break<O: Output + ?Sized>(output: &mut O) -> Result<(), Error> {
    write_raw_head(output, &[BREAK])
}

/// Write a simple value; 24 to 31 are reserved and rejected.
pub fn write_simple<O: Output + ?Sized>(output: &mut O, value: u8) -> Result<(), Error> {
    match value {
        24..=31 => Err(Error::ItemValueOutOfRange),
        0..=23 => write_raw_head(output, &[Major::Special.initial_bits() | value]),
        _ => write_raw_head(
            output,
            &[
                Major::Special.initial_bits() | special::SIMPLE_VALUE,
                value,
            ],
        ),
    }
}

pub fn write_f16_bits<O: Output + ?Sized>(output: &mut O, bits: u16) -> Result<(), Error> {
    let [a, b] = bits.to_be_bytes();
    write_raw_head(
        output,
        &[Major::Special.initial_bits() | special::HALF_FLOAT, a, b],
    )
}

pub fn write_f32_bits<O: Output + ?Sized>(output: &mut O, bits: u32) -> Result<(), Error> {
    let mut buf = [Major::Special.initial_bits() | special::SINGLE_FLOAT; 5];
    buf[1..].copy_from_slice(&bits.to_be_bytes());
    write_raw_head(output, &buf)
}

pub fn write_f64_bits<O: Output + ?Sized>(output: &mut O, bits: u64) -> Result<(), Error> {
    let mut buf = [Major::Special.initial_bits() | special::DOUBLE_FLOAT; 9];
    buf[1..].copy_from_slice(&bits.to_be_bytes());
    write_raw_head(output, &buf)
}

/// Write a float in the narrowest width that preserves its value.
///
/// Every NaN is written as the canonical half-precision quiet NaN.
pub fn write_float<O: Output + ?Sized>(output: &mut O, value: f64) -> Result<(), Error> {
    if value.is_nan() {
        write_f16_bits(output, 0x7E00)
    } else if let Some(f) = narrow_f16(value) {
        write_f16_bits(output, f.to_bits())
    } else if let Some(f) = narrow_f32(value) {
        write_f32_bits(output, f.to_bits())
    } else {
        write_f64_bits(output, value.to_bits())
    }
}
