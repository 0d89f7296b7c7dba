//! Downloaded release assets.

use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::response::Response;

/// A release asset downloaded to a temporary file.
///
/// The file lives exactly as long as this value: dropping it deletes the
/// file. Copy it elsewhere (or [`persist`](Self::persist) it) to keep it.
#[derive(Debug)]
pub struct DownloadedAsset {
    file: NamedTempFile,
    response: Response,
}

impl DownloadedAsset {
    pub(crate) fn new(file: NamedTempFile, response: Response) -> Self {
        Self { file, response }
    }

    /// Where the asset is on disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Metadata of the download response.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Read the whole asset into memory.
    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.path()).await?)
    }

    /// Move the file to `path`, keeping it past the lifetime of this value.
    pub fn persist(self, path: impl AsRef<Path>) -> Result<()> {
        self.file.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}
