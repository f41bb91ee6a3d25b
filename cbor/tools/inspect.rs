/*!
Inspect command - display CBOR data in various formats
*/

use super::diag;
use super::io::{Destination, Source};
use super::sequence::Items;
use super::settings::Settings;
use anyhow::Context;
use clap::Parser;
use cborwire::{Value, decode};
use tracing::{debug, info};

/// Inspect and display CBOR data
#[derive(Parser, Debug)]
#[command(about = "Inspect and display CBOR information", long_about = None)]
pub struct Command {
    /// Output format
    #[arg(
        long,
        default_value = "diag",
        value_name = "FORMAT",
        help = "Output format: diag/diagnostic (CDN, human-readable), json (lossy), hex"
    )]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Destination>,

    /// Input CBOR sequence (use '-' for stdin)
    input: Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// CBOR Diagnostic Notation (human-readable)
    #[value(alias = "diagnostic")]
    Diag,
    /// JSON format (lossy - loses CBOR tags, types, etc.)
    Json,
    /// One line of hexadecimal per item
    Hex,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        info!("Read {} bytes from {}", data.len(), self.input);

        let mut lines = Vec::new();
        for item in Items::new(&data, settings.decode) {
            let (offset, bytes) =
                item.map_err(|(offset, e)| anyhow::anyhow!("Invalid item at offset {offset}: {e}"))?;
            if self.format == OutputFormat::Hex {
                debug!("Item at offset {offset}, {} bytes", bytes.len());
                lines.push(hex::encode(bytes));
                continue;
            }

            let value = parse_item(bytes, settings, offset)?;
            debug!(
                "{} at offset {offset}, {} bytes",
                value.type_name(),
                bytes.len()
            );
            lines.push(match self.format {
                OutputFormat::Json => serde_json::to_string_pretty(&diag::to_json(&value))?,
                _ => diag::to_diag(&value),
            });
        }

        let mut text = lines.join("\n");
        text.push('\n');
        self.output.unwrap_or_default().write_all(text.as_bytes())
    }
}

fn parse_item(bytes: &[u8], settings: &Settings, offset: usize) -> anyhow::Result<Value> {
    decode::parse_with::<Value>(bytes, &settings.decode)
        .map(|(value, _)| value)
        .with_context(|| format!("Failed to decode item at offset {offset}"))
}
