#![no_main]

use cborwire::{DecodeOptions, Value, decode, item_length};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = DecodeOptions::default();
    if let Ok((value, len)) = decode::parse_with::<Value>(data, &options) {
        _ = format!("{value:?}");

        // Anything the decoder accepts, the transcriber must span identically
        assert_eq!(item_length(data, &options), Ok(len));

        // Re-encoding yields a definite item that decodes to the same value.
        // Two-byte simple values 24 to 31 are accepted leniently but cannot
        // be written back.
        if let Ok(encoded) = cborwire::encode::emit(&value) {
            let again = decode::parse::<Value>(&encoded).expect("re-decode");
            assert_eq!(format!("{again:?}"), format!("{value:?}"));
        }
    }
});
