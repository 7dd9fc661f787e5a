use serene_catalog::catalog::{Catalog, ThemeColorizer, ThemeReport};
use serene_catalog::config::Configuration;
use serene_catalog::cover::EmbeddedCoverSource;
use serene_catalog::error::AppError;
use std::path::Path;
use tracing::{error, info, Level};

fn init_logging(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn log_summary(report: &ThemeReport, output: &Path) {
    info!("=== Summary ===");
    info!("Total songs processed: {}", report.total);
    info!("Updated theme colors: {}", report.updated);
    info!("Skipped (already have theme color): {}", report.skipped);
    info!(
        "Not extracted: {} without url, {} missing audio, {} failed",
        report.missing_url, report.missing_audio, report.failed
    );
    info!("Output saved to: {}", output.display());
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let configuration = Configuration::load(None)?;
    init_logging(configuration.log_level()?);

    info!("Disc list path: {}", configuration.disc_list_path.display());
    info!("Music directory: {}", configuration.music_dir.display());
    info!("Output path: {}", configuration.output_path().display());

    if !configuration.disc_list_path.is_file() {
        error!("discList.json not found at {}", configuration.disc_list_path.display());
        return Err(AppError::MissingPath(configuration.disc_list_path.clone()));
    }
    if !configuration.music_dir.is_dir() {
        error!("Music directory not found at {}", configuration.music_dir.display());
        return Err(AppError::MissingPath(configuration.music_dir.clone()));
    }

    let mut catalog = Catalog::load(&configuration.disc_list_path)?;

    let colorizer = ThemeColorizer::new(
        EmbeddedCoverSource::new(),
        configuration.palette.clone(),
        &configuration.music_dir,
    )?
    .with_concurrency(configuration.concurrency);

    let report = colorizer.run(&mut catalog).await;

    catalog.save(configuration.output_path())?;
    log_summary(&report, configuration.output_path());

    Ok(())
}
