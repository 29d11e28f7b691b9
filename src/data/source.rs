use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::config::Settings;
use crate::error::{IngestError, Result};

/// Something that can hand over the raw bytes of a names archive.
pub trait ArchiveSource {
    /// Human-readable origin, used in logs and the status bar.
    fn describe(&self) -> String;

    /// Fetch the complete archive.
    fn fetch(&self) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Downloads the archive with a blocking GET.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|source| IngestError::Network {
                url: settings.source_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            url: settings.source_url.clone(),
        })
    }
}

impl ArchiveSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let network = |source| IngestError::Network {
            url: self.url.clone(),
            source,
        };

        let resp = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(network)?;
        let bytes = resp.bytes().map_err(network)?;
        Ok(bytes.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

/// A names archive already on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ArchiveSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|source| IngestError::FileRead {
            path: self.path.clone(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Archive bytes that are already loaded.
#[cfg(test)]
pub struct MemorySource {
    label: String,
    bytes: Vec<u8>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }
}

#[cfg(test)]
impl ArchiveSource for MemorySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
