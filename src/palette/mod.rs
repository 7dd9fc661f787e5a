pub mod bucket;
pub mod config;
pub mod extractor;
pub mod swatch;

pub use config::{Interpolation, PaletteConfig};
pub use extractor::{extract_palette, extract_palette_dynamic, theme_color, PaletteExtractor};
pub use swatch::Swatch;
