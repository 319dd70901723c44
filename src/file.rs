// SPDX-License-Identifier: GPL-3.0-or-later
// src/file.rs
//
// Encode a composed image to PNG or JPEG and write it to disk.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use log::debug;

use crate::constant::DEFAULT_JPEG_QUALITY;

/// Container formats the engine can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Derive the output format from a file extension. Unknown or missing
    /// extensions fall back to PNG, matching the save dialog's default.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }
}

/// Encode `image` into an in-memory container.
///
/// JPEG quality is clamped to `[1, 100]`; `None` uses the engine default.
/// The quality parameter is ignored for PNG (lossless).
pub fn encode_image(
    image: &DynamicImage,
    format: OutputFormat,
    quality: Option<u8>,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    match format {
        OutputFormat::Png => {
            image
                .write_to(&mut buffer, ImageFormat::Png)
                .context("failed to encode PNG")?;
        }
        OutputFormat::Jpeg => {
            let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            // JPEG has no alpha channel.
            image
                .to_rgb8()
                .write_with_encoder(encoder)
                .context("failed to encode JPEG")?;
        }
    }
    Ok(buffer.into_inner())
}

/// Encode `image` according to the path's extension and write it out,
/// creating missing parent directories first.
pub fn save_image(image: &DynamicImage, path: &Path, quality: Option<u8>) -> anyhow::Result<()> {
    let format = OutputFormat::from_path(path);
    debug!("saving {:?} as {:?}", path, format);

    let bytes = encode_image(image, format, quality)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source() -> DynamicImage {
        DynamicImage::new_rgba8(16, 16)
    }

    #[test]
    fn format_follows_extension_with_png_fallback() {
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("a.JPG")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.jpeg")), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_path(Path::new("a.webp")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), OutputFormat::Png);
    }

    #[test]
    fn png_bytes_start_with_the_png_magic() {
        let bytes = encode_image(&source(), OutputFormat::Png, None).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn jpeg_bytes_start_with_the_jpeg_magic() {
        let bytes = encode_image(&source(), OutputFormat::Jpeg, Some(80)).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn out_of_range_jpeg_quality_is_clamped() {
        // Both extremes must encode rather than error.
        assert!(encode_image(&source(), OutputFormat::Jpeg, Some(0)).is_ok());
        assert!(encode_image(&source(), OutputFormat::Jpeg, Some(255)).is_ok());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = std::env::temp_dir().join(format!("splitgrid-test-{}", std::process::id()));
        let path: PathBuf = dir.join("nested").join("out.png");

        save_image(&source(), &path, None).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
