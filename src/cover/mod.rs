pub mod embedded;
pub mod scoped_file;

use image::RgbImage;
use std::path::Path;

use crate::error::CoverError;

pub use embedded::EmbeddedCoverSource;
pub use scoped_file::ScopedCoverFile;

/// Yields the cover image for an audio file
pub trait CoverSource: Send + Sync + 'static {
    fn load_cover(&self, audio: &Path) -> Result<RgbImage, CoverError>;
}
