use image::{ImageReader, RgbImage};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};
use tracing::warn;

use crate::error::CoverError;

/// Cover bytes staged on disk for the length of one decode.
///
/// The file and its directory are removed when the guard drops. Removal
/// failures are logged and never surface as errors.
pub struct ScopedCoverFile {
    path: PathBuf,
    file: Option<NamedTempFile>,
    dir: Option<TempDir>,
}

impl ScopedCoverFile {
    pub fn create(bytes: &[u8], extension: &str) -> Result<Self, CoverError> {
        let dir = tempfile::Builder::new()
            .prefix("serene-cover-")
            .tempdir()
            .map_err(CoverError::TempFile)?;

        let mut file = tempfile::Builder::new()
            .prefix("cover-")
            .suffix(&format!(".{extension}"))
            .tempfile_in(dir.path())
            .map_err(CoverError::TempFile)?;

        file.write_all(bytes).map_err(CoverError::TempFile)?;
        file.flush().map_err(CoverError::TempFile)?;

        Ok(Self {
            path: file.path().to_path_buf(),
            file: Some(file),
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn decode(&self) -> Result<RgbImage, CoverError> {
        let image = ImageReader::open(&self.path)
            .map_err(CoverError::TempFile)?
            .with_guessed_format()
            .map_err(CoverError::TempFile)?
            .decode()
            .map_err(CoverError::Decode)?;
        Ok(image.to_rgb8())
    }
}

impl Drop for ScopedCoverFile {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = file.close() {
                warn!("Failed to remove temporary cover {}: {}", self.path.display(), e);
            }
        }
        if let Some(dir) = self.dir.take() {
            let dir_path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove temporary directory {}: {}", dir_path.display(), e);
            }
        }
    }
}
