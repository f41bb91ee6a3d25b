/*!
Validate command - check that input is a well-formed CBOR sequence
*/

use super::io::Source;
use super::sequence::Items;
use super::settings::Settings;
use clap::Parser;
use tracing::{debug, error, info};

/// Check every item of a CBOR sequence under the configured parse mode
#[derive(Parser, Debug)]
#[command(about = "Validate a CBOR sequence", long_about = None)]
pub struct Command {
    /// Do not print the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Input CBOR sequence (use '-' for stdin)
    input: Source,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        info!(
            "Validating {} bytes from {} in {:?} mode",
            data.len(),
            self.input,
            settings.decode.mode
        );

        let mut count = 0usize;
        for item in Items::new(&data, settings.decode) {
            match item {
                Ok((offset, bytes)) => {
                    debug!("Item {count} at offset {offset}, {} bytes", bytes.len());
                    count += 1;
                }
                Err((offset, e)) => {
                    error!("Item {count} at offset {offset} is invalid: {e}");
                    anyhow::bail!("Item {count} at offset {offset} is invalid: {e}");
                }
            }
        }

        if !self.quiet {
            println!("{}: {count} valid item(s), {} bytes", self.input, data.len());
        }
        Ok(())
    }
}
