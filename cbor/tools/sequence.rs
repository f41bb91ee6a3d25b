/*!
Walk a CBOR sequence (RFC 8742) item by item without decoding it.
*/

use cborwire::{DecodeOptions, Transcriber, io::SliceInput};

/// The items of a sequence as `(offset, encoded bytes)`.
///
/// Iteration stops after the first malformed item, which is yielded as an
/// error carrying the offset it started at.
pub struct Items<'a> {
    data: &'a [u8],
    input: SliceInput<'a>,
    transcriber: Transcriber,
    failed: bool,
}

impl<'a> Items<'a> {
    pub fn new(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            input: SliceInput::new(data),
            transcriber: Transcriber::new(options),
            failed: false,
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = Result<(usize, &'a [u8]), (usize, cborwire::Error)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.input.is_empty() {
            return None;
        }
        let start = self.input.offset();
        match self.transcriber.skip_item(&mut self.input) {
            Ok(()) => Some(Ok((start, &self.data[start..self.input.offset()]))),
            Err(e) => {
                self.failed = true;
                Some(Err((start, e)))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn splits_items() {
        let data = hex!("018201029fff61");
        let mut items = Items::new(&data, DecodeOptions::default());
        assert_eq!(items.next(), Some(Ok((0, &hex!("01")[..]))));
        assert_eq!(items.next(), Some(Ok((1, &hex!("820102")[..]))));
        assert_eq!(items.next(), Some(Ok((4, &hex!("9fff")[..]))));
        assert_eq!(
            items.next(),
            Some(Err((6, cborwire::Error::MissingData)))
        );
        assert_eq!(items.next(), None);
    }
}
