/*!
CBOR Tools - A CLI for working with CBOR data

Every command reads a CBOR sequence (RFC 8742): zero or more items laid end
to end, from a file or stdin.

# Commands

- `inspect`: Display CBOR data in various formats (diagnostic, JSON, hex)
- `validate`: Check every item under the configured parse mode
- `extract`: Copy one item out byte for byte

# Configuration

Settings are read from an optional TOML file (`--config`, or the
`CBOR_TOOLS_CONFIG_FILE` environment variable), then from `CBOR_TOOLS_*`
environment variables, then from the command line:

```toml
log_level = "info"

[decode]
mode = "canonical"
max_string_size = 1048576
max_items = 65536
max_depth = 64
```

# Examples

```bash
# Inspect a CBOR file
cbor inspect bundle.cbor

# Inspect as JSON (lossy)
cbor inspect --format json data.cbor

# Check that a file is canonically encoded
cbor validate --mode canonical data.cbor

# Pull the third item out of a sequence
cbor extract --index 2 -o item.cbor data.cbor
```
*/

use clap::{Parser, Subcommand};

mod diag;
mod extract;
mod inspect;
mod io;
mod sequence;
mod settings;
mod validate;

/// A CLI tool for working with CBOR data
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CLI tool for inspecting and validating CBOR data",
    long_about = "CBOR Tools provides utilities for working with CBOR (Concise Binary Object Representation) data.\n\n\
                  Features:\n\
                  - Inspect CBOR sequences in human-readable formats\n\
                  - Validate encodings in lenient, canonical or strict mode\n\
                  - Extract single items without re-encoding them"
)]
struct Cli {
    #[command(flatten)]
    global: settings::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect and display CBOR data in various formats
    Inspect(inspect::Command),

    /// Validate a CBOR sequence
    Validate(validate::Command),

    /// Copy one item of a CBOR sequence out unchanged
    Extract(extract::Command),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = settings::load(&cli.global)?;

    match cli.command {
        Commands::Inspect(args) => args.exec(&settings),
        Commands::Validate(args) => args.exec(&settings),
        Commands::Extract(args) => args.exec(&settings),
    }
}
