use std::path::PathBuf;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Palette Error: {0}")]
    Palette(#[from] PaletteError),
    #[error("Cover Error: {0}")]
    Cover(#[from] CoverError),
    #[error("Path not found: {0}")]
    MissingPath(PathBuf),
}

// Palette Extraction Error Type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaletteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Failed to read tags from {1}: {0}")]
    TagRead(lofty::error::LoftyError, PathBuf),
    #[error("No embedded cover art in {0}")]
    NoCover(PathBuf),
    #[error("Failed to stage cover in a temporary file: {0}")]
    TempFile(std::io::Error),
    #[error("Failed to decode cover image: {0}")]
    Decode(image::ImageError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {1}: {0}")]
    Read(std::io::Error, PathBuf),
    #[error("Failed to write catalog {1}: {0}")]
    Write(std::io::Error, PathBuf),
    #[error("Failed to parse catalog {1}: {0}")]
    Parse(serde_json::Error, PathBuf),
    #[error("Failed to serialize catalog: {0}")]
    Serialize(serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
