/*!
Command line endpoints: a file path, or `-` for stdin/stdout
*/

use anyhow::Context;
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Where a CBOR sequence is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Slurp the whole sequence; items are located by offset afterwards.
    pub fn read_all(&self) -> anyhow::Result<Vec<u8>> {
        let data = match self {
            Self::Stdin => {
                let mut data = Vec::new();
                std::io::stdin().lock().read_to_end(&mut data).map(|_| data)
            }
            Self::File(path) => std::fs::read(path),
        };
        data.with_context(|| format!("Failed to read {self}"))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::Stdin,
            path => Self::File(path.into()),
        })
    }
}

/// Where command output goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Destination {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn write_all(&self, data: &[u8]) -> anyhow::Result<()> {
        let r = match self {
            Self::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(data).and_then(|_| stdout.flush())
            }
            Self::File(path) => std::fs::write(path, data),
        };
        r.with_context(|| format!("Failed to write {self}"))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for Destination {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "-" => Self::Stdout,
            path => Self::File(path.into()),
        })
    }
}
