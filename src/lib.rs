pub mod catalog;
pub mod config;
pub mod cover;
pub mod error;
pub mod palette;

pub use error::{AppError, CatalogError, ConfigError, CoverError, PaletteError};

pub use catalog::{Catalog, ThemeColorizer, ThemeReport};
pub use config::Configuration;
pub use cover::{CoverSource, EmbeddedCoverSource};
pub use palette::{extract_palette, Interpolation, PaletteConfig, Swatch};
