use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::Level;

use crate::error::ConfigError;
use crate::palette::PaletteConfig;

const DEFAULT_CONFIG_NAME: &str = "serene";
const ENV_PREFIX: &str = "SERENE";

/// Settings for the theme-color pass.
///
/// Layered as defaults, then `serene.{toml,json,yaml}` in the working
/// directory if present, then `SERENE__*` environment variables
/// (`SERENE__PALETTE__MAX_COLORS=3`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub disc_list_path: PathBuf,
    pub music_dir: PathBuf,
    /// Defaults to `disc_list_path`, rewriting the catalog in place
    pub output_path: Option<PathBuf>,
    pub concurrency: usize,
    pub log_level: String,
    pub palette: PaletteConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            disc_list_path: PathBuf::from("public/discList.json"),
            music_dir: PathBuf::from("public/music"),
            output_path: None,
            concurrency: 4,
            log_level: "info".to_string(),
            palette: PaletteConfig::default(),
        }
    }
}

impl Configuration {
    /// Load from an explicit file, or from the optional default file when `None`
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, ConfigError> {
        let configuration: Self = settings.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "concurrency must be greater than 0".to_string(),
            ));
        }

        self.palette
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.log_level()?;

        Ok(())
    }

    pub fn output_path(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(&self.disc_list_path)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Interpolation;

    // File layer only, so SERENE__* variables in the test environment don't leak in
    fn load_file(path: &Path) -> Result<Configuration, ConfigError> {
        let settings = Config::builder().add_source(File::from(path)).build()?;
        Configuration::from_settings(settings)
    }

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serene.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let configuration = Configuration::default();
        assert!(configuration.validate().is_ok());
        assert_eq!(configuration.output_path(), Path::new("public/discList.json"));
        assert_eq!(configuration.log_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_load_from_file_keeps_unset_defaults() {
        let (_dir, path) = write_config(
            r#"
music_dir = "/srv/music"
output_path = "/srv/out.json"
concurrency = 2

[palette]
max_colors = 3
interpolation = "nearest"
"#,
        );

        let configuration = load_file(&path).unwrap();
        assert_eq!(configuration.music_dir, PathBuf::from("/srv/music"));
        assert_eq!(configuration.output_path(), Path::new("/srv/out.json"));
        assert_eq!(configuration.concurrency, 2);
        assert_eq!(configuration.palette.max_colors, 3);
        assert_eq!(configuration.palette.interpolation, Interpolation::Nearest);
        assert_eq!(configuration.palette.resolution, 100);
        assert_eq!(configuration.disc_list_path, PathBuf::from("public/discList.json"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let (_dir, path) = write_config("concurrency = 0\n");
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        let (_dir, path) = write_config("[palette]\nresolution = 1\n");
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        let (_dir, path) = write_config("log_level = \"loud\"\n");
        assert!(load_file(&path).is_err());

        let (_dir, path) = write_config("[palette]\nbw_tolerance = 200\n");
        assert!(matches!(load_file(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Configuration::load(Some(Path::new("/nonexistent/serene.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
        assert!(matches!(
            load_file(Path::new("/nonexistent/serene.toml")),
            Err(ConfigError::Load(_))
        ));
    }
}
