//! Contents.json for the single-size AppIcon asset catalog slot.
//!
//! Xcode 14 and later accept one 1024x1024 universal image and derive every
//! other size from it, so the catalog only ever lists one entry.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of a Contents.json file.
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

/// One image of the AppIcon set.
#[derive(Serialize, Debug, Clone)]
pub struct ImageEntry {
    pub filename: String,

    /// Device type, "universal" for the single-size slot
    pub idiom: String,

    /// Target platform ("ios", "macos", "watchos")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Size in points, e.g. "1024x1024"
    pub size: String,
}

/// Versioning and authorship information
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    pub version: u32,
    pub author: String,
}

impl ContentsFile {
    /// Contents.json listing `image` as the only AppIcon entry.
    pub fn single_size(image: ImageEntry) -> Self {
        Self {
            images: vec![image],
            info: Info::default(),
        }
    }
}

impl ImageEntry {
    /// Universal iOS entry for a square icon of `size` pixels.
    pub fn universal_ios(filename: impl Into<String>, size: u32) -> Self {
        Self {
            filename: filename.into(),
            idiom: "universal".to_string(),
            platform: Some("ios".to_string()),
            size: format!("{size}x{size}"),
        }
    }
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

/// Write a Contents.json next to the icon, referencing `filename` at `size`.
pub fn write_contents_json(dir: &Path, filename: &str, size: u32) -> Result<()> {
    let contents = ContentsFile::single_size(ImageEntry::universal_ios(filename, size));
    let json = serde_json::to_string_pretty(&contents).context("serialize Contents.json")?;
    let path = dir.join("Contents.json");
    std::fs::write(&path, json + "\n")
        .with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_universal_entry() {
        let entry = ImageEntry::universal_ios("icon_1024.png", 1024);
        assert_eq!(entry.filename, "icon_1024.png");
        assert_eq!(entry.idiom, "universal");
        assert_eq!(entry.platform.as_deref(), Some("ios"));
        assert_eq!(entry.size, "1024x1024");
    }

    #[test]
    fn test_single_size_serialization() {
        let contents = ContentsFile::single_size(ImageEntry::universal_ios("icon_1024.png", 1024));
        let json = serde_json::to_string_pretty(&contents).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");
        let images = parsed["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0]["filename"], "icon_1024.png");
        assert_eq!(images[0]["idiom"], "universal");
        assert_eq!(images[0]["platform"], "ios");
        assert_eq!(images[0]["size"], "1024x1024");
        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["info"]["author"], "xcode");
    }

    #[test]
    fn test_platform_is_omitted_when_unset() {
        let mut entry = ImageEntry::universal_ios("icon.png", 512);
        entry.platform = None;
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("platform"), "unexpected platform in {json}");
    }

    #[test]
    fn test_write_contents_json() {
        let temp_dir = TempDir::new().unwrap();
        write_contents_json(temp_dir.path(), "icon_1024.png", 1024).unwrap();

        let contents_path = temp_dir.path().join("Contents.json");
        let file_content = std::fs::read_to_string(&contents_path).unwrap();
        assert!(file_content.contains("\"filename\": \"icon_1024.png\""));
        assert!(file_content.contains("\"size\": \"1024x1024\""));
        assert!(file_content.contains("\"version\": 1"));
    }
}
