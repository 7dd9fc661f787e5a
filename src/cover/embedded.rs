use image::RgbImage;
use lofty::picture::{MimeType, PictureType};
use lofty::prelude::*;
use lofty::probe::Probe;
use std::path::Path;
use tracing::debug;

use super::scoped_file::ScopedCoverFile;
use super::CoverSource;
use crate::error::CoverError;

/// Reads the front cover from an audio file's tags (mp3/flac/m4a/ogg/...)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCoverSource;

impl EmbeddedCoverSource {
    pub fn new() -> Self {
        Self
    }
}

impl CoverSource for EmbeddedCoverSource {
    fn load_cover(&self, audio: &Path) -> Result<RgbImage, CoverError> {
        let tagged = Probe::open(audio)
            .and_then(|file| file.read())
            .map_err(|e| CoverError::TagRead(e, audio.to_path_buf()))?;

        let pictures = || tagged.tags().iter().flat_map(|tag| tag.pictures());
        let picture = pictures()
            .find(|pic| pic.pic_type() == PictureType::CoverFront)
            .or_else(|| pictures().next())
            .ok_or_else(|| CoverError::NoCover(audio.to_path_buf()))?;

        debug!(
            "Cover for {}: {:?}, {} bytes",
            audio.display(),
            picture.pic_type(),
            picture.data().len()
        );

        let staged = ScopedCoverFile::create(picture.data(), extension_for(picture.mime_type()))?;
        staged.decode()
    }
}

fn extension_for(mime: Option<&MimeType>) -> &'static str {
    match mime {
        Some(MimeType::Png) => "png",
        Some(MimeType::Jpeg) => "jpg",
        Some(MimeType::Bmp) => "bmp",
        Some(MimeType::Gif) => "gif",
        Some(MimeType::Tiff) => "tiff",
        // decoding sniffs the real format anyway
        _ => "img",
    }
}
