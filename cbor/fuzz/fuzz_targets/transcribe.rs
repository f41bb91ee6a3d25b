#![no_main]

use cborwire::{
    DecodeOptions, ParseMode, copy_item_to,
    io::{ReaderInput, SliceInput, VecOutput},
};
use libfuzzer_sys::fuzz_target;

/// Hands out at most `step` bytes per read.
struct Chunked<'a> {
    data: &'a [u8],
    step: usize,
}

impl embedded_io::ErrorType for Chunked<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_io::Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&control, data)) = data.split_first() else {
        return;
    };
    let mode = match control % 3 {
        0 => ParseMode::Lenient,
        1 => ParseMode::Canonical,
        _ => ParseMode::Strict,
    };
    let options = DecodeOptions::with_mode(mode);

    // Fully resident input
    let mut input = SliceInput::new(data);
    let mut output = VecOutput::new();
    let resident = copy_item_to(&mut input, &mut output, &options).map(|_| input.offset());

    // The same bytes trickled through a small refilling buffer
    let mut chunked = ReaderInput::with_capacity(
        Chunked {
            data,
            step: (control as usize >> 2) % 9 + 1,
        },
        16,
    );
    let mut streamed = VecOutput::new();
    let result = copy_item_to(&mut chunked, &mut streamed, &options);

    match resident {
        Ok(len) => {
            assert_eq!(result, Ok(()));
            assert_eq!(output.as_slice(), &data[..len]);
            assert_eq!(streamed.as_slice(), output.as_slice());
        }
        Err(_) => assert!(result.is_err()),
    }
});
