use image::{DynamicImage, RgbImage};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::bucket::{bucket_key, is_near_black, is_near_white, Bucket, BucketKey};
use super::config::{Interpolation, PaletteConfig};
use super::swatch::Swatch;
use crate::error::PaletteError;

/// Reduces an image to its most common colors
pub struct PaletteExtractor {
    config: PaletteConfig,
}

impl PaletteExtractor {
    pub fn new(config: PaletteConfig) -> Result<Self, PaletteError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn extract(&self, image: &RgbImage) -> Result<Vec<Swatch>, PaletteError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PaletteError::InvalidInput(format!(
                "image is empty ({width}x{height})"
            )));
        }

        let buckets = self.fill_buckets(image);
        let total_buckets = buckets.len();

        let mut ranked: Vec<(BucketKey, Bucket)> = buckets
            .into_iter()
            .filter(|(_, bucket)| !self.is_excluded(bucket))
            .collect();

        debug!(
            buckets = total_buckets,
            retained = ranked.len(),
            "quantized {}x{} image",
            width,
            height
        );

        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let total: u64 = ranked.iter().map(|(_, bucket)| bucket.count).sum();

        ranked.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then(ka.cmp(kb)));
        ranked.truncate(self.config.max_colors);

        let swatches = ranked
            .iter()
            .map(|(key, bucket)| {
                let rgb = self.representative(*key, bucket);
                let swatch = Swatch::new(rgb, bucket.count as f64 / total as f64);
                trace!(key, count = bucket.count, hex = %swatch.hex, "swatch");
                swatch
            })
            .collect();

        Ok(swatches)
    }

    fn fill_buckets(&self, image: &RgbImage) -> HashMap<BucketKey, Bucket> {
        let mut buckets: HashMap<BucketKey, Bucket> = HashMap::new();
        for px in image.pixels() {
            let key = bucket_key(px, self.config.resolution);
            buckets.entry(key).or_default().add(px);
        }
        buckets
    }

    // The mean decides black/white, so pure black stays excluded at any resolution
    fn is_excluded(&self, bucket: &Bucket) -> bool {
        if !self.config.exclude_bw {
            return false;
        }
        let mean = bucket.mean();
        is_near_black(mean, self.config.bw_tolerance)
            || is_near_white(mean, self.config.bw_tolerance)
    }

    fn representative(&self, key: BucketKey, bucket: &Bucket) -> [u8; 3] {
        match self.config.interpolation {
            Interpolation::Nearest => Bucket::midpoint(key, self.config.resolution),
            Interpolation::Linear => bucket.mean(),
        }
    }
}

/// Ranked swatches for `image`, at most `config.max_colors` of them
pub fn extract_palette(
    image: &RgbImage,
    config: &PaletteConfig,
) -> Result<Vec<Swatch>, PaletteError> {
    PaletteExtractor::new(config.clone())?.extract(image)
}

pub fn extract_palette_dynamic(
    image: &DynamicImage,
    config: &PaletteConfig,
) -> Result<Vec<Swatch>, PaletteError> {
    extract_palette(&image.to_rgb8(), config)
}

/// Hex of the top swatch, `None` when every color was filtered out
pub fn theme_color(
    image: &RgbImage,
    config: &PaletteConfig,
) -> Result<Option<String>, PaletteError> {
    let palette = extract_palette(image, config)?;
    Ok(palette.into_iter().next().map(|swatch| swatch.hex))
}
