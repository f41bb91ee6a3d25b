/*!
Layered configuration: an optional TOML file, then `CBOR_TOOLS_*`
environment variables, then command line overrides.
*/

use cborwire::{DecodeOptions, ParseMode};
use serde::Deserialize;
use tracing::info;

const CONFIG_FILE_VAR: &str = "CBOR_TOOLS_CONFIG_FILE";
const ENV_PREFIX: &str = "CBOR_TOOLS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Accept any well-formed encoding
    Lenient,
    /// Reject non-minimal heads and indefinite-length items
    Canonical,
    /// Canonical, and floats must use their shortest lossless width
    Strict,
}

impl From<Mode> for ParseMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Lenient => ParseMode::Lenient,
            Mode::Canonical => ParseMode::Canonical,
            Mode::Strict => ParseMode::Strict,
        }
    }
}

/// Options shared by every subcommand
#[derive(clap::Args, Debug, Default)]
pub struct GlobalArgs {
    /// Use a custom configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Parse mode, overriding the configured one
    #[arg(long, global = true, value_enum)]
    mode: Option<Mode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: Option<String>,
    pub decode: DecodeOptions,
}

fn resolve(args: &GlobalArgs) -> anyhow::Result<(Settings, Option<String>)> {
    let mut b = config::Config::builder();

    let source = args
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_FILE_VAR).ok());
    if let Some(source) = &source {
        b = b.add_source(config::File::with_name(source).format(config::FileFormat::Toml));
    }

    // Pull in environment vars, e.g. CBOR_TOOLS_DECODE__MODE=strict
    b = b.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let mut settings: Settings = b.build()?.try_deserialize()?;
    if let Some(level) = &args.log_level {
        settings.log_level = Some(level.clone());
    }
    if let Some(mode) = args.mode {
        settings.decode.mode = mode.into();
    }
    Ok((settings, source))
}

pub fn load(args: &GlobalArgs) -> anyhow::Result<Settings> {
    let (settings, source) = resolve(args)?;

    init_logger(&settings)?;
    match source {
        Some(source) => info!("Using configuration file '{source}'"),
        None => info!("No configuration file, using defaults and environment"),
    }
    Ok(settings)
}

fn init_logger(settings: &Settings) -> anyhow::Result<()> {
    let log_level = settings
        .log_level
        .as_deref()
        .unwrap_or("warn")
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|e| anyhow::anyhow!("Invalid log level: {e}"))?;

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(
            log_level > tracing_subscriber::filter::LevelFilter::from_level(tracing::Level::INFO),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
