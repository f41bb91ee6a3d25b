/*!
Extract command - copy one item of a CBOR sequence out verbatim
*/

use super::io::{Destination, Source};
use super::settings::Settings;
use anyhow::Context;
use cborwire::{
    Transcriber,
    io::{SliceInput, VecOutput},
};
use clap::Parser;
use tracing::{debug, info};

/// Copy the exact encoded bytes of the Nth item
#[derive(Parser, Debug)]
#[command(about = "Copy one item of a CBOR sequence out unchanged", long_about = None)]
pub struct Command {
    /// Zero-based index of the item to extract
    #[arg(short = 'n', long, default_value_t = 0)]
    index: usize,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Destination>,

    /// Input CBOR sequence (use '-' for stdin)
    input: Source,
}

/// Skip `index` items of `data`, then copy the next one.
fn extract(data: &[u8], index: usize, settings: &Settings) -> anyhow::Result<Vec<u8>> {
    let mut input = SliceInput::new(data);
    let mut transcriber = Transcriber::new(settings.decode);

    for i in 0..index {
        if input.is_empty() {
            anyhow::bail!("Input holds only {i} item(s)");
        }
        let offset = input.offset();
        transcriber
            .skip_item(&mut input)
            .with_context(|| format!("Item {i} at offset {offset} is invalid"))?;
    }
    if input.is_empty() {
        anyhow::bail!("Input holds only {index} item(s)");
    }

    let offset = input.offset();
    let mut output = VecOutput::new();
    transcriber
        .copy_item(&mut input, &mut output)
        .with_context(|| format!("Item {index} at offset {offset} is invalid"))?;
    debug!("Item {index} spans offsets {offset}..{}", input.offset());
    Ok(output.into_vec())
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let data = self.input.read_all()?;

        let item = extract(&data, self.index, settings)?;
        info!("Extracted item {} ({} bytes)", self.index, item.len());

        self.output.unwrap_or_default().write_all(&item)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn extracts_exact_bytes() {
        let data = hex!("019f0102ff1b0000000000000005");
        let settings = Settings::default();
        assert_eq!(extract(&data, 1, &settings).unwrap(), hex!("9f0102ff"));
        assert_eq!(
            extract(&data, 2, &settings).unwrap(),
            hex!("1b0000000000000005")
        );
        assert!(extract(&data, 3, &settings).is_err());
    }
}
