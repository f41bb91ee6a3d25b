#![no_std]
extern crate alloc;

mod error;
mod options;
mod value;

pub mod chunked;
pub mod decode;
pub mod encode;
pub mod head;
pub mod transcribe;

pub use cborwire_io as io;

use cborwire_io::{Input, Output, SliceInput, VecOutput};

pub use chunked::{Slot, read_array, read_bytes, read_map, read_text};
pub use error::Error;
pub use head::{
    BREAK, Head, MAX_HEAD_LENGTH, Major, check_mode, decode_head, decode_head_speculative,
    encode_head, peek_head, read_head, special, write_break, write_f16_bits, write_f32_bits,
    write_f64_bits, write_float, write_head, write_indefinite, write_simple,
};
pub use options::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITEMS, DEFAULT_MAX_STRING_SIZE, DecodeOptions, ParseMode,
};
pub use transcribe::{Transcriber, copy_item_to, item_length, skip_item};
pub use value::Value;

use head::at_break;




#[cfg(test)]
mod decode_tests;
