use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use super::disc_list::Catalog;
use crate::cover::CoverSource;
use crate::error::{AppError, PaletteError};
use crate::palette::{theme_color, PaletteConfig};

/// Outcome counts of one theme-color pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeReport {
    pub total: usize,
    pub updated: usize,
    pub skipped: usize,
    pub missing_url: usize,
    pub missing_audio: usize,
    pub failed: usize,
}

/// Fills in `themeColor` for songs that lack one, from their cover art
pub struct ThemeColorizer<S: CoverSource> {
    source: Arc<S>,
    palette: PaletteConfig,
    music_dir: PathBuf,
    concurrency: usize,
}

impl<S: CoverSource> ThemeColorizer<S> {
    pub fn new(
        source: S,
        palette: PaletteConfig,
        music_dir: impl Into<PathBuf>,
    ) -> Result<Self, PaletteError> {
        palette.validate()?;
        Ok(Self {
            source: Arc::new(source),
            palette,
            music_dir: music_dir.into(),
            concurrency: 1,
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Local file for a catalog url, resolved by file name against the music directory
    pub fn audio_path(&self, url: &str) -> PathBuf {
        let file_name = url.rsplit('/').next().unwrap_or(url);
        self.music_dir.join(file_name)
    }

    pub async fn run(&self, catalog: &mut Catalog) -> ThemeReport {
        let mut songs = catalog.songs_mut();
        let mut report = ThemeReport {
            total: songs.len(),
            ..ThemeReport::default()
        };

        let mut jobs = Vec::new();
        for (index, song) in songs.iter().enumerate() {
            let label = format!("[{}/{}] {}", index + 1, report.total, song.name());

            if let Some(color) = song.theme_color() {
                report.skipped += 1;
                info!("{}: Already has theme color ({})", label, color);
                continue;
            }

            let Some(url) = song.url() else {
                report.missing_url += 1;
                warn!("{}: No URL found", label);
                continue;
            };

            let audio = self.audio_path(url);
            if !audio.is_file() {
                report.missing_audio += 1;
                warn!("{}: Audio file not found ({})", label, audio.display());
                continue;
            }

            info!("{}: Extracting theme color...", label);
            jobs.push((index, audio));
        }

        let results: Vec<_> = stream::iter(jobs.into_iter().map(|(index, audio)| {
            let source = Arc::clone(&self.source);
            let palette = self.palette.clone();
            async move {
                let result = tokio::task::spawn_blocking(move || {
                    extract_theme_color(source.as_ref(), &audio, &palette)
                })
                .await;
                (index, result)
            }
        }))
        .buffered(self.concurrency)
        .collect()
        .await;

        for (index, result) in results {
            let song = &mut songs[index];
            match result {
                Ok(Ok(Some(hex))) => {
                    song.set_theme_color(&hex);
                    report.updated += 1;
                    info!("{} -> Theme color extracted: {}", song.name(), hex);
                }
                Ok(Ok(None)) => {
                    report.failed += 1;
                    warn!("{} -> No usable color in cover", song.name());
                }
                Ok(Err(e)) => {
                    report.failed += 1;
                    warn!("{} -> Failed to extract theme color: {}", song.name(), e);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("{} -> Extraction task failed: {}", song.name(), e);
                }
            }
        }

        report
    }
}

fn extract_theme_color<S: CoverSource>(
    source: &S,
    audio: &Path,
    palette: &PaletteConfig,
) -> Result<Option<String>, AppError> {
    let cover = source.load_cover(audio)?;
    Ok(theme_color(&cover, palette)?)
}
