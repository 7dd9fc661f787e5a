use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

use crate::error::CatalogError;

/// Reserved top-level key holding the mirror link, never a song list
pub const MIRRORS_KEY: &str = "mirrors";
pub const THEME_COLOR_KEY: &str = "themeColor";

/// The `discList.json` document: server name to song list (or playlist folder).
///
/// Key order and unknown fields survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    servers: IndexMap<String, Value>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text =
            fs::read_to_string(path).map_err(|e| CatalogError::Read(e, path.to_path_buf()))?;
        serde_json::from_str(&text).map_err(|e| CatalogError::Parse(e, path.to_path_buf()))
    }

    /// Writes to a sibling temp file, then renames it over `path`
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let text = self.to_json_string()?;
        let write_err = |e| CatalogError::Write(e, path.to_path_buf());

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
        staged.write_all(text.as_bytes()).map_err(write_err)?;
        staged.flush().map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Pretty JSON, 2-space indent, non-ASCII written as-is
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let mut text = serde_json::to_string_pretty(self).map_err(CatalogError::Serialize)?;
        text.push('\n');
        Ok(text)
    }

    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.servers
            .keys()
            .map(String::as_str)
            .filter(|name| *name != MIRRORS_KEY)
    }

    pub fn get(&self, server: &str) -> Option<&Value> {
        self.servers.get(server)
    }

    /// Every song object in catalog order, including those nested in folders
    pub fn songs_mut(&mut self) -> Vec<SongEntry<'_>> {
        let mut songs = Vec::new();
        for (server, value) in self.servers.iter_mut() {
            if server.as_str() == MIRRORS_KEY {
                continue;
            }
            let mut found = Vec::new();
            collect_songs(server, value, &mut found);
            songs.extend(found.into_iter().map(|fields| SongEntry {
                server: server.as_str(),
                fields,
            }));
        }
        songs
    }
}

fn collect_songs<'a>(
    server: &str,
    value: &'a mut Value,
    out: &mut Vec<&'a mut Map<String, Value>>,
) {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                match item {
                    Value::Object(song) => out.push(song),
                    _ => warn!("Invalid song format in {}, skipping", server),
                }
            }
        }
        // Playlist folder: { "tracks": [...], "children": { name: [...] | folder } }
        Value::Object(folder) => {
            for (key, child) in folder.iter_mut() {
                match key.as_str() {
                    "tracks" if child.is_array() => collect_songs(server, child, out),
                    "children" => {
                        if let Value::Object(children) = child {
                            for nested in children.values_mut() {
                                collect_songs(server, nested, out);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => warn!("Unexpected value under {}, skipping", server),
    }
}

/// Mutable view of one song record
pub struct SongEntry<'a> {
    server: &'a str,
    fields: &'a mut Map<String, Value>,
}

impl SongEntry<'_> {
    pub fn server(&self) -> &str {
        self.server
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or("Unknown")
    }

    pub fn artist(&self) -> &str {
        self.str_field("artist").unwrap_or("Unknown")
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url").filter(|url| !url.is_empty())
    }

    /// Trimmed theme color, `None` when absent or blank
    pub fn theme_color(&self) -> Option<&str> {
        self.str_field(THEME_COLOR_KEY)
            .map(str::trim)
            .filter(|color| !color.is_empty())
    }

    pub fn set_theme_color(&mut self, hex: &str) {
        self.fields
            .insert(THEME_COLOR_KEY.to_string(), Value::String(hex.to_string()));
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
  "This Server": [
    {
      "name": "晴天",
      "artist": "周杰伦",
      "url": "./music/qingtian.mp3",
      "themeColor": "  ",
      "album": "叶惠美"
    },
    {
      "name": "Second",
      "url": "./music/second.flac",
      "themeColor": "#aabbcc"
    },
    42
  ],
  "Folders": {
    "tracks": [
      { "name": "Loose", "url": "./music/loose.mp3" }
    ],
    "children": {
      "Nested": [
        { "name": "Deep", "url": "" }
      ]
    }
  },
  "mirrors": {
    "link": "https://mirror.example/mirrors.json"
  }
}"##;

    fn sample() -> Catalog {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_songs_include_nested_folders() {
        let mut catalog = sample();
        let songs = catalog.songs_mut();
        let names: Vec<&str> = songs.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["晴天", "Second", "Loose", "Deep"]);
        assert_eq!(songs[2].server(), "Folders");
    }

    #[test]
    fn test_server_names_skip_mirrors() {
        let catalog = sample();
        let names: Vec<&str> = catalog.server_names().collect();
        assert_eq!(names, vec!["This Server", "Folders"]);
    }

    #[test]
    fn test_song_accessors() {
        let mut catalog = sample();
        let songs = catalog.songs_mut();

        assert_eq!(songs[0].theme_color(), None);
        assert_eq!(songs[0].artist(), "周杰伦");
        assert_eq!(songs[1].theme_color(), Some("#aabbcc"));
        assert_eq!(songs[1].artist(), "Unknown");
        assert_eq!(songs[3].url(), None);
    }

    #[test]
    fn test_set_theme_color_keeps_field_order() {
        let mut catalog = sample();
        {
            let mut songs = catalog.songs_mut();
            songs[0].set_theme_color("#102030");
        }

        let text = catalog.to_json_string().unwrap();
        let color = text.find("#102030").unwrap();
        let album = text.find("叶惠美").unwrap();
        assert!(color < album);
        assert!(text.contains("晴天"));
        assert!(text.contains("\"mirrors\""));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discList.json");

        let catalog = sample();
        catalog.save(&path).unwrap();
        let mut loaded = Catalog::load(&path).unwrap();

        assert_eq!(loaded, catalog);
        assert_eq!(loaded.songs_mut().len(), 4);
        assert!(loaded.get("mirrors").is_some());
    }

    #[test]
    fn test_save_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discList.json");
        fs::write(&path, "{\"stale\": []}").unwrap();

        let mut catalog = sample();
        catalog.songs_mut()[0].set_theme_color("#0a0b0c");
        catalog.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("#0a0b0c"));
        assert!(!text.contains("stale"));

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let result = sample().save(Path::new("/nonexistent/dir/discList.json"));
        assert!(matches!(result, Err(CatalogError::Write(_, _))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/discList.json"));
        assert!(matches!(result, Err(CatalogError::Read(_, _))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discList.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::Parse(_, _))
        ));
    }
}
