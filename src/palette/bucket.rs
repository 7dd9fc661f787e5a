use image::Rgb;

/// Quantized color key, `(r_bin << 32) | (g_bin << 16) | b_bin`.
/// Ordering of keys follows the lexicographic order of the bins.
pub type BucketKey = u64;

pub fn quantize_channel(channel: u8, resolution: u16) -> u16 {
    let bin = (channel as u32 * resolution as u32) / 256;
    bin.min(resolution as u32 - 1) as u16
}

pub fn bucket_key(px: &Rgb<u8>, resolution: u16) -> BucketKey {
    let r = quantize_channel(px[0], resolution) as u64;
    let g = quantize_channel(px[1], resolution) as u64;
    let b = quantize_channel(px[2], resolution) as u64;
    (r << 32) | (g << 16) | b
}

pub fn key_bins(key: BucketKey) -> [u16; 3] {
    [
        ((key >> 32) & 0xFFFF) as u16,
        ((key >> 16) & 0xFFFF) as u16,
        (key & 0xFFFF) as u16,
    ]
}

/// Center of a bin in 8-bit channel space
pub fn bin_midpoint(bin: u16, resolution: u16) -> u8 {
    let mid = ((2 * bin as u32 + 1) * 256) / (2 * resolution as u32);
    mid.min(255) as u8
}

/// Pixel count and running channel sums for one quantization cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub count: u64,
    pub sum: [u64; 3],
}

impl Bucket {
    pub fn add(&mut self, px: &Rgb<u8>) {
        self.count += 1;
        self.sum[0] += px[0] as u64;
        self.sum[1] += px[1] as u64;
        self.sum[2] += px[2] as u64;
    }

    /// Rounded mean of the original pixel values
    pub fn mean(&self) -> [u8; 3] {
        if self.count == 0 {
            return [0, 0, 0];
        }
        let half = self.count / 2;
        [
            ((self.sum[0] + half) / self.count) as u8,
            ((self.sum[1] + half) / self.count) as u8,
            ((self.sum[2] + half) / self.count) as u8,
        ]
    }

    pub fn midpoint(key: BucketKey, resolution: u16) -> [u8; 3] {
        let [r, g, b] = key_bins(key);
        [
            bin_midpoint(r, resolution),
            bin_midpoint(g, resolution),
            bin_midpoint(b, resolution),
        ]
    }
}

pub fn is_near_black(rgb: [u8; 3], tolerance: u8) -> bool {
    rgb.iter().all(|&c| c <= tolerance)
}

pub fn is_near_white(rgb: [u8; 3], tolerance: u8) -> bool {
    rgb.iter().all(|&c| c >= 255 - tolerance)
}
