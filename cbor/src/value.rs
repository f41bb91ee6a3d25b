use super::*;
use alloc::{boxed::Box, string::String, vec::Vec};
use chunked::{read_array_items, read_map_items, read_string_payload};

/// A fully decoded, owned CBOR item.
///
/// Indefinite-length strings are concatenated and indefinite containers
/// are flattened, so re-encoding a `Value` always produces definite forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unsigned(u64),
    /// The encoded magnitude `n` of the integer `-1 - n`
    Negative(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Tag(u64, Box<Value>),
    False,
    True,
    Null,
    Undefined,
    Simple(u8),
    Float(f64),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unsigned(_) => "Unsigned Integer",
            Self::Negative(_) => "Negative Integer",
            Self::Bytes(_) => "Byte String",
            Self::Text(_) => "Text String",
            Self::Array(_) => "Array",
            Self::Map(_) => "Map",
            Self::Tag(..) => "Tag",
            Self::False | Self::True => "Boolean",
            Self::Null => "Null",
            Self::Undefined => "Undefined",
            Self::Simple(_) => "Simple Value",
            Self::Float(_) => "Float",
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Unsigned(n) => Some(*n as i128),
            Self::Negative(n) => Some(-1 - *n as i128),
            _ => None,
        }
    }

    fn decode<I: Input + ?Sized>(
        input: &mut I,
        options: &DecodeOptions,
        depth: usize,
    ) -> Result<Self, Error> {
        let head = read_head(input, options.mode)?;
        Self::decode_item(input, &head, options, depth)
    }

    fn decode_item<I: Input + ?Sized>(
        input: &mut I,
        head: &Head,
        options: &DecodeOptions,
        depth: usize,
    ) -> Result<Self, Error> {
        match head.major {
            Major::Unsigned => Ok(Self::Unsigned(head.value)),
            Major::Negative => Ok(Self::Negative(head.value)),
            Major::Bytes => {
                let mut v = Vec::new();
                read_string_payload(input, head, options, &mut v)?;
                Ok(Self::Bytes(v))
            }
            Major::Text => {
                let mut v = Vec::new();
                read_string_payload(input, head, options, &mut v)?;
                String::from_utf8(v)
                    .map(Self::Text)
                    .map_err(|_| Error::InvalidUtf8)
            }
            Major::Array => {
                let depth = descend(depth)?;
                let mut items = Vec::new();
                read_array_items(input, head, options, |input| {
                    items.push(Self::decode(input, options, depth)?);
                    Ok(())
                })?;
                Ok(Self::Array(items))
            }
            Major::Map => {
                let depth = descend(depth)?;
                let mut pairs = Vec::new();
                let mut key = None;
                read_map_items(input, head, options, |input, slot| {
                    let item = Self::decode(input, options, depth)?;
                    match (slot, key.take()) {
                        (Slot::Key, _) => key = Some(item),
                        (Slot::Value, Some(k)) => pairs.push((k, item)),
                        (Slot::Value, None) => return Err(Error::ItemTypeMismatch),
                    }
                    Ok(())
                })?;
                Ok(Self::Map(pairs))
            }
            Major::Tag => {
                let depth = descend(depth)?;
                let item = Self::decode(input, options, depth)?;
                Ok(Self::Tag(head.value, Box::new(item)))
            }
            Major::Special => {
                if let Some(f) = head.as_f64() {
                    return Ok(Self::Float(f));
                }
                match head.simple() {
                    Some(special::FALSE) => Ok(Self::False),
                    Some(special::TRUE) => Ok(Self::True),
                    Some(special::NULL) => Ok(Self::Null),
                    Some(special::UNDEFINED) => Ok(Self::Undefined),
                    Some(v) => Ok(Self::Simple(v)),
                    // A break outside of an indefinite container
                    None => Err(Error::ItemTypeMismatch),
                }
            }
        }
    }
}

fn descend(depth: usize) -> Result<usize, Error> {
    depth.checked_sub(1).ok_or(Error::MaxNestingDepth)
}

impl decode::FromCbor for Value {
    fn from_cbor<I: Input + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self, Error> {
        Self::decode(input, options, options.max_depth)
    }
}

impl encode::ToCbor for Value {
    fn to_cbor<O: Output>(&self, encoder: &mut encode::Encoder<O>) -> Result<(), Error> {
        match self {
            Self::Unsigned(n) => encoder.emit_head(Major::Unsigned, *n),
            Self::Negative(n) => encoder.emit_head(Major::Negative, *n),
            Self::Bytes(b) => encoder.emit(b.as_slice()),
            Self::Text(s) => encoder.emit(s.as_str()),
            Self::Array(items) => encoder.emit_array(Some(items.len()), |a| {
                for item in items {
                    a.emit(item)?;
                }
                Ok(())
            }),
            Self::Map(pairs) => encoder.emit_map(Some(pairs.len()), |m| {
                for (k, v) in pairs {
                    m.emit(k)?;
                    m.emit(v)?;
                }
                Ok(())
            }),
            Self::Tag(tag, item) => encoder.emit_tagged(item.as_ref(), [*tag]),
            Self::False => encoder.emit(&false),
            Self::True => encoder.emit(&true),
            Self::Null => encoder.emit_simple(special::NULL),
            Self::Undefined => encoder.emit_simple(special::UNDEFINED),
            Self::Simple(v) => encoder.emit_simple(*v),
            Self::Float(f) => encoder.emit(f),
        }
    }
}
