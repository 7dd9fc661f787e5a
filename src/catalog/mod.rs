pub mod disc_list;
pub mod theme_colorizer;

pub use disc_list::{Catalog, SongEntry, MIRRORS_KEY, THEME_COLOR_KEY};
pub use theme_colorizer::{ThemeColorizer, ThemeReport};
