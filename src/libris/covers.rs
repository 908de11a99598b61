//! # Cover Images
//!
//! Covers are stored outside the library document, one PNG per book, and the JSON
//! record only keeps a path to the file. Two operations matter:
//!
//! - [`CoverStore::store_cover`]: decode an upload, squash it onto a fixed square
//!   canvas (no cropping, no padding), and write it under a name derived from the title.
//! - [`CoverStore::to_displayable`]: turn a cover into a Base64 payload for inline
//!   embedding, falling back to a placeholder when the file is gone.
//!
//! File names come from the title alone, so two books whose titles sanitize to the
//! same name share (and overwrite) one cover file.

use crate::config::LibrisConfig;
use crate::error::Result;
use crate::store::fs::write_atomic;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const PLACEHOLDER_SHADE: Rgb<u8> = Rgb([214, 205, 190]);

/// Where a displayed cover came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// The book's own cover file
    Stored(PathBuf),
    /// The configured placeholder file
    Placeholder(PathBuf),
    /// Neither file exists; a plain canvas was rendered in memory
    Generated,
}

/// A cover ready for inline embedding.
#[derive(Debug, Clone)]
pub struct DisplayCover {
    pub source: CoverSource,
    pub mime_type: &'static str,
    /// Base64 of the raw image bytes
    pub data: String,
}

impl DisplayCover {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self.source, CoverSource::Stored(_))
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

pub struct CoverStore {
    root: PathBuf,
    image_dir: PathBuf,
    placeholder: PathBuf,
    size: u32,
}

impl CoverStore {
    pub fn new(root: impl Into<PathBuf>, config: &LibrisConfig) -> Self {
        Self {
            root: root.into(),
            image_dir: config.image_dir.clone(),
            placeholder: config.placeholder.clone(),
            size: config.cover_size,
        }
    }

    /// Cover directory as stored in book records (relative to the root).
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Resolves a recorded cover path against the library root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute path of the configured placeholder image.
    pub fn placeholder_path(&self) -> PathBuf {
        self.resolve(&self.placeholder)
    }

    /// Decodes `upload`, resizes it to the cover canvas and writes it as PNG.
    ///
    /// Returns the path to record on the book, relative to the library root.
    pub fn store_cover(&self, upload: &[u8], title: &str) -> Result<PathBuf> {
        let decoded = image::load_from_memory(upload)?;
        let resized = decoded.resize_exact(self.size, self.size, FilterType::CatmullRom);

        let relative = self.image_dir.join(cover_filename(title));
        let target = self.resolve(&relative);
        write_atomic(&target, &encode_png(&resized)?)?;

        tracing::debug!("Stored cover for {:?} at {}", title, target.display());
        Ok(relative)
    }

    /// Reads the cover at `path` as Base64, or the placeholder if it is absent.
    pub fn to_displayable(&self, path: Option<&Path>) -> Result<DisplayCover> {
        if let Some(path) = path {
            let full = self.resolve(path);
            if full.is_file() {
                let bytes = fs::read(&full)?;
                return Ok(encode_display(CoverSource::Stored(full), &bytes));
            }
            tracing::warn!("Cover {} is missing, using placeholder", full.display());
        }

        let placeholder = self.placeholder_path();
        if placeholder.is_file() {
            let bytes = fs::read(&placeholder)?;
            return Ok(encode_display(CoverSource::Placeholder(placeholder), &bytes));
        }

        let blank = RgbImage::from_pixel(self.size, self.size, PLACEHOLDER_SHADE);
        let bytes = encode_png(&DynamicImage::ImageRgb8(blank))?;
        Ok(encode_display(CoverSource::Generated, &bytes))
    }

    /// Lists PNG files currently in the cover directory.
    pub fn stored_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.resolve(&self.image_dir);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if path.is_file() && is_png {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// File name for a title's cover: spaces become `_`, anything that could escape the
/// cover directory becomes `_` too.
pub fn cover_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "untitled.png".to_string()
    } else {
        format!("{}.png", stem)
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

fn encode_display(source: CoverSource, bytes: &[u8]) -> DisplayCover {
    let mime_type = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream");
    DisplayCover {
        source,
        mime_type,
        data: STANDARD.encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CoverStore) {
        let dir = TempDir::new().unwrap();
        let covers = CoverStore::new(dir.path(), &LibrisConfig::default());
        (dir, covers)
    }

    fn jpeg_upload(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 80, 200])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_cover_filename() {
        assert_eq!(cover_filename("Dune"), "Dune.png");
        assert_eq!(cover_filename("The Left Hand of Darkness"), "The_Left_Hand_of_Darkness.png");
        assert_eq!(cover_filename("../../etc/passwd"), "_.._etc_passwd.png");
        assert_eq!(cover_filename("a/b\\c"), "a_b_c.png");
        assert_eq!(cover_filename("Dune "), "Dune_.png");
        assert_eq!(cover_filename("   "), "___.png");
        assert_eq!(cover_filename(".."), "untitled.png");
    }

    #[test]
    fn store_cover_resizes_to_square_png() {
        let (dir, covers) = setup();
        let path = covers.store_cover(&jpeg_upload(640, 300), "The Hobbit").unwrap();

        assert_eq!(path, PathBuf::from("book_images/The_Hobbit.png"));
        let on_disk = dir.path().join(&path);
        let stored = image::open(&on_disk).unwrap();
        assert_eq!((stored.width(), stored.height()), (200, 200));
        assert_eq!(
            image::guess_format(&fs::read(&on_disk).unwrap()).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn same_title_overwrites_cover() {
        let (dir, covers) = setup();
        covers.store_cover(&jpeg_upload(10, 10), "Dune").unwrap();
        covers.store_cover(&jpeg_upload(30, 20), "Dune").unwrap();

        let files = covers.stored_files().unwrap();
        assert_eq!(files, vec![dir.path().join("book_images/Dune.png")]);
    }

    #[test]
    fn invalid_upload_is_an_image_error() {
        let (dir, covers) = setup();
        let err = covers.store_cover(b"definitely not an image", "Dune").unwrap_err();
        assert!(matches!(err, crate::error::LibrisError::Image(_)));
        assert!(!dir.path().join("book_images/Dune.png").exists());
    }

    #[test]
    fn displayable_reads_stored_cover() {
        let (_dir, covers) = setup();
        let path = covers.store_cover(&jpeg_upload(50, 50), "Dune").unwrap();

        let display = covers.to_displayable(Some(&path)).unwrap();
        assert!(!display.is_placeholder());
        assert_eq!(display.mime_type, "image/png");
        let decoded = STANDARD.decode(&display.data).unwrap();
        assert_eq!(decoded, fs::read(covers.resolve(&path)).unwrap());
        assert!(display.data_uri().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn displayable_falls_back_to_placeholder_file() {
        let (dir, covers) = setup();
        let placeholder = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        placeholder.save(dir.path().join("placeholder.png")).unwrap();

        let display = covers
            .to_displayable(Some(Path::new("book_images/Gone.png")))
            .unwrap();
        assert_eq!(
            display.source,
            CoverSource::Placeholder(dir.path().join("placeholder.png"))
        );
    }

    #[test]
    fn displayable_generates_canvas_without_placeholder() {
        let (_dir, covers) = setup();
        let display = covers.to_displayable(None).unwrap();
        assert_eq!(display.source, CoverSource::Generated);

        let bytes = STANDARD.decode(&display.data).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (200, 200));
    }

    #[test]
    fn stored_files_ignores_other_files() {
        let (dir, covers) = setup();
        covers.store_cover(&jpeg_upload(5, 5), "A").unwrap();
        fs::write(dir.path().join("book_images/notes.txt"), "x").unwrap();

        assert_eq!(covers.stored_files().unwrap().len(), 1);
    }
}
