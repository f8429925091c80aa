//! Export pipeline
//!
//! Two independent actions read the preview handed to them at call time and
//! deliver a file with a fixed name into the output directory. When there is
//! nothing to export (no mounted preview, no vector markup) they do nothing
//! and report `Ok(None)`.

use crate::color::QrColor;
use crate::error::{Error, Result};
use crate::preview::Preview;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// File name of the raster export
pub const PNG_FILE_NAME: &str = "qrcode.png";

/// File name of the vector export
pub const SVG_FILE_NAME: &str = "qrcode.svg";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Writes exports into one directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Create an exporter targeting `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory exports are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Rasterize the region onto white and download it as `qrcode.png`.
    pub async fn export_png(&self, preview: Option<&Preview>) -> Result<Option<PathBuf>> {
        if !region_mounted(preview) {
            tracing::debug!("PNG export skipped: preview region not mounted");
            return Ok(None);
        }
        let Some(preview) = preview else {
            return Ok(None);
        };

        let region = preview.clone();
        let bytes = tokio::task::spawn_blocking(move || encode_png(&region.rasterize()))
            .await
            .map_err(|e| Error::Other(format!("PNG rasterization task failed: {e}")))??;

        self.download(PNG_FILE_NAME, bytes).await.map(Some)
    }

    /// Serialize the vector markup and download it as `qrcode.svg`.
    pub async fn export_svg(&self, preview: Option<&Preview>) -> Result<Option<PathBuf>> {
        if !region_mounted(preview) {
            tracing::debug!("SVG export skipped: preview region not mounted");
            return Ok(None);
        }
        let markup = preview.and_then(Preview::vector_markup);
        if !vector_markup_present(markup.as_deref()) {
            tracing::debug!("SVG export skipped: no vector markup in preview");
            return Ok(None);
        }
        let Some(markup) = markup else {
            return Ok(None);
        };

        let document = format!("{XML_DECLARATION}\n{markup}\n");
        self.download(SVG_FILE_NAME, document.into_bytes())
            .await
            .map(Some)
    }

    /// Write `bytes` under the fixed `file_name`, replacing any earlier export.
    ///
    /// The bytes go to a temporary file first; the temporary handle is
    /// released whether or not the final rename succeeds.
    async fn download(&self, file_name: &'static str, bytes: Vec<u8>) -> Result<PathBuf> {
        let dir = self.output_dir.clone();
        let target = dir.join(file_name);
        let destination = target.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            std::fs::create_dir_all(&dir)?;
            let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
            temp.write_all(&bytes)?;
            temp.flush()?;
            temp.persist(&destination).map_err(|e| Error::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| Error::Other(format!("Export write task failed: {e}")))??;

        tracing::info!(path = %target.display(), "Exported {file_name}");
        Ok(target)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Whether a preview region is available to export from
pub fn region_mounted(preview: Option<&Preview>) -> bool {
    preview.is_some()
}

/// Whether the preview produced vector markup to serialize
pub fn vector_markup_present(markup: Option<&str>) -> bool {
    markup.is_some_and(|m| !m.is_empty())
}

/// Composite the region over an opaque white backing, dropping alpha.
pub fn flatten_on_white(region: &RgbaImage) -> RgbImage {
    let [wr, wg, wb] = QrColor::WHITE.channels();
    RgbImage::from_fn(region.width(), region.height(), |x, y| {
        let p = region.get_pixel(x, y);
        let alpha = p[3] as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * (255 - alpha)) / 255) as u8;
        Rgb([mix(p[0], wr), mix(p[1], wg), mix(p[2], wb)])
    })
}

/// Encode the region as an opaque PNG.
pub fn encode_png(region: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(flatten_on_white(region))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
