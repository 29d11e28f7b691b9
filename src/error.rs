use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort ingestion of the names archive.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The archive could not be downloaded (connection, timeout, non-2xx status).
    #[error("Failed to download {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The fetched bytes are not a readable ZIP archive.
    #[error("Corrupt archive: {source}")]
    CorruptArchive {
        #[source]
        source: zip::result::ZipError,
    },

    /// An archive entry name does not carry a year at the expected position.
    #[error("Archive entry '{entry}' does not carry a 4-digit year after its 3-letter prefix")]
    MalformedFilename { entry: String },

    /// A data line does not decode to `name,sex,count`.
    #[error("Malformed record in '{entry}' at line {line}: {reason}")]
    MalformedRecord {
        entry: String,
        line: u64,
        reason: String,
    },

    /// A local archive could not be read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

impl From<zip::result::ZipError> for IngestError {
    fn from(source: zip::result::ZipError) -> Self {
        IngestError::CorruptArchive { source }
    }
}
