use crate::error::{LibrisError, Result};
use crate::store::fs::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "libris.json";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_IMAGE_DIR: &str = "book_images";
const DEFAULT_LIBRARY_FILE: &str = "library.json";
const DEFAULT_PLACEHOLDER: &str = "placeholder.png";
const DEFAULT_COVER_SIZE: u32 = 200;

/// Keys accepted by [`LibrisConfig::get`] and [`LibrisConfig::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "data-dir",
    "image-dir",
    "library-file",
    "placeholder",
    "cover-size",
];

/// Configuration for a library root, stored in `<root>/libris.json`.
///
/// All paths are relative to the library root unless given as absolute paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    /// Directory holding the library file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory holding the resized cover images
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Name of the JSON file inside `data_dir`
    #[serde(default = "default_library_file")]
    pub library_file: String,

    /// Image shown for books whose cover is missing
    #[serde(default = "default_placeholder")]
    pub placeholder: PathBuf,

    /// Edge length of the square cover canvas, in pixels
    #[serde(default = "default_cover_size")]
    pub cover_size: u32,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_image_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

fn default_library_file() -> String {
    DEFAULT_LIBRARY_FILE.to_string()
}

fn default_placeholder() -> PathBuf {
    PathBuf::from(DEFAULT_PLACEHOLDER)
}

fn default_cover_size() -> u32 {
    DEFAULT_COVER_SIZE
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            image_dir: default_image_dir(),
            library_file: default_library_file(),
            placeholder: default_placeholder(),
            cover_size: default_cover_size(),
        }
    }
}

impl LibrisConfig {
    /// Load config from the given root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let config_path = root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: LibrisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomic(&root.as_ref().join(CONFIG_FILENAME), content.as_bytes())
    }

    /// Full path of the library file under `root`.
    pub fn library_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_dir).join(&self.library_file)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-dir" => Some(self.data_dir.display().to_string()),
            "image-dir" => Some(self.image_dir.display().to_string()),
            "library-file" => Some(self.library_file.clone()),
            "placeholder" => Some(self.placeholder.display().to_string()),
            "cover-size" => Some(self.cover_size.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LibrisError::validation(format!("{} cannot be empty", key)));
        }
        match key {
            "data-dir" => self.data_dir = PathBuf::from(value),
            "image-dir" => self.image_dir = PathBuf::from(value),
            "library-file" => self.library_file = value.to_string(),
            "placeholder" => self.placeholder = PathBuf::from(value),
            "cover-size" => {
                self.cover_size = value
                    .parse::<u32>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| {
                        LibrisError::validation(format!(
                            "cover-size must be a positive integer, got {}",
                            value
                        ))
                    })?;
            }
            other => {
                return Err(LibrisError::validation(format!(
                    "Unknown config key: {} (expected one of {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LibrisConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.image_dir, PathBuf::from("book_images"));
        assert_eq!(config.library_file, "library.json");
        assert_eq!(config.cover_size, 200);
    }

    #[test]
    fn test_library_path() {
        let config = LibrisConfig::default();
        let path = config.library_path(Path::new("/tmp/shelf"));
        assert_eq!(path, PathBuf::from("/tmp/shelf/data/library.json"));
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = LibrisConfig::load(temp.path()).unwrap();
        assert_eq!(config, LibrisConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"cover_size": 120}"#).unwrap();

        let config = LibrisConfig::load(temp.path()).unwrap();
        assert_eq!(config.cover_size, 120);
        assert_eq!(config.library_file, "library.json");
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let mut config = LibrisConfig::default();
        config.set("image-dir", "covers").unwrap();
        config.save(temp.path()).unwrap();

        let loaded = LibrisConfig::load(temp.path()).unwrap();
        assert_eq!(loaded.image_dir, PathBuf::from("covers"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = LibrisConfig::default();
        assert!(config.set("cover-size", "0").is_err());
        assert!(config.set("cover-size", "big").is_err());
        assert!(config.set("library-file", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, LibrisConfig::default());
    }

    #[test]
    fn test_entries_cover_every_key() {
        let config = LibrisConfig::default();
        let entries = config.entries();
        assert_eq!(entries.len(), CONFIG_KEYS.len());
        assert_eq!(entries[4], ("cover-size", "200".to_string()));
    }
}
