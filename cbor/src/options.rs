/// How strictly the wire encoding is checked while decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ParseMode {
    /// Accept any well-formed encoding.
    #[default]
    Lenient,

    /// Reject non-minimal integer, length and tag encodings, and
    /// indefinite-length items.
    Canonical,

    /// As [`ParseMode::Canonical`], and additionally reject floats that could
    /// have been encoded losslessly in a narrower width.
    Strict,
}

pub const DEFAULT_MAX_STRING_SIZE: u64 = 64 * 1024 * 1024;
pub const DEFAULT_MAX_ITEMS: u64 = 16 * 1024 * 1024;
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Limits and policy applied to every item read from an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeOptions {
    pub mode: ParseMode,

    /// Largest byte or text string accepted, summed across all chunks.
    pub max_string_size: u64,

    /// Largest element count (arrays) or pair count (maps) accepted.
    pub max_items: u64,

    /// Deepest nesting accepted by the recursive [`Value`](crate::Value)
    /// decoder. The transcriber does not recurse and ignores this.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mode: ParseMode::default(),
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_items: DEFAULT_MAX_ITEMS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_mode(mode: ParseMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}
