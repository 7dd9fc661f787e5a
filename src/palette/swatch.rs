use image::Rgb;
use serde::{Deserialize, Serialize};

/// A representative color and the share of the image it stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub rgb: [u8; 3],
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub weight: f64,
}

impl Swatch {
    pub fn new(rgb: [u8; 3], weight: f64) -> Self {
        Self {
            rgb,
            hex: Self::to_hex(rgb),
            weight,
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        Rgb(self.rgb)
    }

    /// Lowercase `#rrggbb` for an RGB triple
    pub fn to_hex([r, g, b]: [u8; 3]) -> String {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}
