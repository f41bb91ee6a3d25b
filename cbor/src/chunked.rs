/*!
Definite and indefinite-length strings, arrays and maps.

Every length read from the wire is checked against the bytes the input can
still supply before anything is allocated or consumed, and string totals are
re-checked on every chunk.
*/

use super::*;
use alloc::{string::String, vec::Vec};

/// Which half of a map pair a callback is being asked to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Key,
    Value,
}

/// Reject a definite count the rest of the input cannot possibly hold.
///
/// Every element costs at least one byte, every map pair at least two.
pub(crate) fn check_available<I: Input + ?Sized>(
    input: &I,
    major: Major,
    count: u64,
) -> Result<(), Error> {
    let available = match major {
        Major::Map => input.input_size() / 2,
        _ => input.input_size(),
    };
    if count > available {
        Err(Error::MissingData)
    } else {
        Ok(())
    }
}

pub(crate) fn check_items(count: u64, options: &DecodeOptions) -> Result<(), Error> {
    if count > options.max_items {
        Err(Error::ItemValueOutOfRange)
    } else {
        Ok(())
    }
}

/// Validate one string chunk of `len` bytes, returning the new running total.
pub(crate) fn check_chunk<I: Input + ?Sized>(
    input: &I,
    len: u64,
    total: u64,
    options: &DecodeOptions,
) -> Result<u64, Error> {
    check_available(input, Major::Bytes, len)?;
    match total.checked_add(len) {
        Some(total) if total <= options.max_string_size => Ok(total),
        _ => Err(Error::StringExceedsSizeLimit),
    }
}

fn append_chunk<I: Input + ?Sized>(
    input: &mut I,
    major: Major,
    len: u64,
    dest: &mut Vec<u8>,
) -> Result<(), Error> {
    let len = usize::try_from(len).map_err(|_| Error::NotEnoughMemory)?;
    dest.try_reserve(len).map_err(|_| Error::NotEnoughMemory)?;
    let start = dest.len();
    dest.resize(start + len, 0);
    input.bulk_read(&mut dest[start..])?;

    // Each chunk of a text string must be valid UTF-8 on its own
    if major == Major::Text && core::str::from_utf8(&dest[start..]).is_err() {
        return Err(Error::InvalidUtf8);
    }
    Ok(())
}

/// Read the payload of a string whose head has already been consumed.
pub(crate) fn read_string_payload<I: Input + ?Sized>(
    input: &mut I,
    head: &Head,
    options: &DecodeOptions,
    dest: &mut Vec<u8>,
) -> Result<(), Error> {
    if !head.indefinite {
        check_chunk(input, head.value, 0, options)?;
        return append_chunk(input, head.major, head.value, dest);
    }

    let mut total = 0;
    loop {
        let chunk = read_head(input, options.mode)?;
        if chunk.is_break() {
            return Ok(());
        }
        if chunk.major != head.major || chunk.indefinite {
            return Err(Error::InvalidIndefiniteSubitem);
        }
        total = check_chunk(input, chunk.value, total, options)?;
        append_chunk(input, head.major, chunk.value, dest)?;
    }
}

fn read_string<I: Input + ?Sized>(
    input: &mut I,
    major: Major,
    options: &DecodeOptions,
) -> Result<Vec<u8>, Error> {
    let head = read_head(input, options.mode)?;
    if head.major != major || head.is_break() {
        return Err(Error::ItemTypeMismatch);
    }
    let mut v = Vec::new();
    read_string_payload(input, &head, options, &mut v)?;
    Ok(v)
}

/// Read a complete byte string, concatenating the chunks of an indefinite one.
pub fn read_bytes<I: Input + ?Sized>(
    input: &mut I,
    options: &DecodeOptions,
) -> Result<Vec<u8>, Error> {
    read_string(input, Major::Bytes, options)
}

/// Read a complete text string, concatenating the chunks of an indefinite one.
pub fn read_text<I: Input + ?Sized>(
    input: &mut I,
    options: &DecodeOptions,
) -> Result<String, Error> {
    String::from_utf8(read_string(input, Major::Text, options)?).map_err(|_| Error::InvalidUtf8)
}

/// Drive `f` once per element of an array whose head has been consumed.
pub(crate) fn read_array_items<I, F>(
    input: &mut I,
    head: &Head,
    options: &DecodeOptions,
    mut f: F,
) -> Result<u64, Error>
where
    I: Input + ?Sized,
    F: FnMut(&mut I) -> Result<(), Error>,
{
    if !head.indefinite {
        check_available(input, Major::Array, head.value)?;
        check_items(head.value, options)?;
        for _ in 0..head.value {
            f(input)?;
        }
        return Ok(head.value);
    }

    let mut count = 0;
    loop {
        if at_break(input)? {
            input.discard_buffered(1);
            return Ok(count);
        }
        count += 1;
        check_items(count, options)?;
        f(input)?;
    }
}

/// Drive `f` once per key and once per value of a map whose head has been
/// consumed, returning the number of pairs.
pub(crate) fn read_map_items<I, F>(
    input: &mut I,
    head: &Head,
    options: &DecodeOptions,
    mut f: F,
) -> Result<u64, Error>
where
    I: Input + ?Sized,
    F: FnMut(&mut I, Slot) -> Result<(), Error>,
{
    if !head.indefinite {
        check_available(input, Major::Map, head.value)?;
        check_items(head.value, options)?;
        for _ in 0..head.value {
            f(input, Slot::Key)?;
            f(input, Slot::Value)?;
        }
        return Ok(head.value);
    }

    let mut items = 0u64;
    loop {
        if at_break(input)? {
            // Keys and values come in pairs
            if items % 2 == 1 {
                return Err(Error::ItemTypeMismatch);
            }
            input.discard_buffered(1);
            return Ok(items / 2);
        }
        let slot = if items % 2 == 0 {
            check_items(items / 2 + 1, options)?;
            Slot::Key
        } else {
            Slot::Value
        };
        f(input, slot)?;
        items += 1;
    }
}

/// Read an array, calling `f` to decode each element in turn.
///
/// Returns the number of elements.
pub fn read_array<I, F>(input: &mut I, options: &DecodeOptions, f: F) -> Result<u64, Error>
where
    I: Input + ?Sized,
    F: FnMut(&mut I) -> Result<(), Error>,
{
    let head = read_head(input, options.mode)?;
    if head.major != Major::Array {
        return Err(Error::ItemTypeMismatch);
    }
    read_array_items(input, &head, options, f)
}

/// Read a map, calling `f` to decode each key and each value in turn.
///
/// Returns the number of pairs.
pub fn read_map<I, F>(input: &mut I, options: &DecodeOptions, f: F) -> Result<u64, Error>
where
    I: Input + ?Sized,
    F: FnMut(&mut I, Slot) -> Result<(), Error>,
{
    let head = read_head(input, options.mode)?;
    if head.major != Major::Map {
        return Err(Error::ItemTypeMismatch);
    }
    read_map_items(input, &head, options, f)
}
