use serde::Deserialize;

use crate::error::PaletteError;

/// Tunable parameters for palette extraction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub max_colors: usize,
    pub resolution: u16,
    pub exclude_bw: bool,
    pub interpolation: Interpolation,
    /// Per-channel distance from 0 or 255 that still counts as black or white
    pub bw_tolerance: u8,
}

/// How a bucket is turned back into a single color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest, // Midpoint of the quantization bin
    Linear,  // Mean of the pixels that fell into the bin
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: 1,
            resolution: 100,
            exclude_bw: true,
            interpolation: Interpolation::Linear,
            bw_tolerance: 16,
        }
    }
}

impl PaletteConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.max_colors < 1 {
            return Err(PaletteError::InvalidInput(format!(
                "max_colors must be at least 1, got {}",
                self.max_colors
            )));
        }

        if self.resolution < 2 {
            return Err(PaletteError::InvalidInput(format!(
                "resolution must be at least 2, got {}",
                self.resolution
            )));
        }

        if self.bw_tolerance >= 128 {
            return Err(PaletteError::InvalidInput(format!(
                "bw_tolerance must be below 128, got {}",
                self.bw_tolerance
            )));
        }

        Ok(())
    }

    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    pub fn with_resolution(mut self, resolution: u16) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_exclude_bw(mut self, exclude_bw: bool) -> Self {
        self.exclude_bw = exclude_bw;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_bw_tolerance(mut self, bw_tolerance: u8) -> Self {
        self.bw_tolerance = bw_tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PaletteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.interpolation, Interpolation::Linear);
        assert!(config.exclude_bw);
    }

    #[test]
    fn test_rejects_zero_max_colors() {
        let config = PaletteConfig::default().with_max_colors(0);
        assert!(matches!(
            config.validate(),
            Err(PaletteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_low_resolution() {
        let config = PaletteConfig::default().with_resolution(1);
        assert!(config.validate().is_err());

        let config = PaletteConfig::default().with_resolution(2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overlapping_bw_tolerance() {
        // at 128 a mid-grey would count as both black and white
        let config = PaletteConfig::default().with_bw_tolerance(128);
        assert!(matches!(
            config.validate(),
            Err(PaletteError::InvalidInput(_))
        ));
        assert!(PaletteConfig::default().with_bw_tolerance(255).validate().is_err());
        assert!(PaletteConfig::default().with_bw_tolerance(127).validate().is_ok());
        assert!(PaletteConfig::default().with_bw_tolerance(0).validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_partial_keys() {
        let config: PaletteConfig =
            serde_json::from_str(r#"{"max_colors": 4, "interpolation": "nearest"}"#).unwrap();
        assert_eq!(config.max_colors, 4);
        assert_eq!(config.interpolation, Interpolation::Nearest);
        assert_eq!(config.resolution, 100);
    }
}
