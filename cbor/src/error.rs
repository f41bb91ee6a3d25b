use cborwire_io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid additional information value {0}")]
    InvalidAdditionalInformation(u8),

    #[error("Incorrect item type")]
    ItemTypeMismatch,

    #[error("Item value out of range")]
    ItemValueOutOfRange,

    #[error("Indefinite-length item not permitted")]
    IndefiniteItem,

    #[error("Indefinite-length item contains an invalid chunk")]
    InvalidIndefiniteSubitem,

    #[error("Additional information is not minimally encoded")]
    OversizedAdditionalInformationCoding,

    #[error("Not enough data for encoded value")]
    MissingData,

    #[error("Unexpected end of stream")]
    EndOfStream,

    #[error("String exceeds size limit")]
    StringExceedsSizeLimit,

    #[error("Not enough memory")]
    NotEnoughMemory,

    #[error("Text string is not valid UTF-8")]
    InvalidUtf8,

    #[error("Maximum nesting depth exceeded")]
    MaxNestingDepth,

    #[error("Stream error: {0:?}")]
    Stream(ErrorKind),
}

impl From<cborwire_io::Error> for Error {
    fn from(e: cborwire_io::Error) -> Self {
        match e {
            cborwire_io::Error::EndOfStream => Self::EndOfStream,
            cborwire_io::Error::NotEnoughMemory => Self::NotEnoughMemory,
            cborwire_io::Error::Io(kind) => Self::Stream(kind),
        }
    }
}
