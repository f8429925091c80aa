//! Logo loading
//!
//! Logos are held as `data:` URLs, exactly as they would be embedded in a
//! document. Reads are asynchronous and tagged so that a slow read for an
//! older selection can never overwrite a newer one.

use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A logo image encoded as a base64 data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    data_url: String,
}

impl Logo {
    /// Encode raw file bytes, sniffing the MIME type from their content.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime = image::guess_format(bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME);
        Self {
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Wrap an existing data URL after checking its shape.
    pub fn from_data_url(data_url: impl Into<String>) -> Result<Self> {
        let data_url = data_url.into();
        split_data_url(&data_url)?;
        Ok(Self { data_url })
    }

    /// The full `data:` URL
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// MIME type declared by the data URL
    pub fn mime_type(&self) -> &str {
        split_data_url(&self.data_url)
            .map(|(mime, _)| mime)
            .unwrap_or(FALLBACK_MIME)
    }

    /// Decode the embedded bytes
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let (_, encoded) = split_data_url(&self.data_url)?;
        Ok(STANDARD.decode(encoded)?)
    }

    /// Decode the embedded bytes as an image
    pub fn decode_image(&self) -> Result<DynamicImage> {
        let bytes = self.decode_bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

impl fmt::Display for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.decode_bytes().map(|b| b.len()).unwrap_or(0);
        write!(f, "{} ({} bytes)", self.mime_type(), size)
    }
}

fn split_data_url(data_url: &str) -> Result<(&str, &str)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::InvalidDataUrl("missing 'data:' prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::InvalidDataUrl("missing ',' separator".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::InvalidDataUrl("only base64 data URLs are supported".to_string()))?;
    Ok((mime, payload))
}

/// Identifier of one logo read, ordered by issue time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogoRequest(u64);

/// Result of a finished logo read
#[derive(Debug, Clone)]
pub struct LogoCompletion {
    /// Request this completion answers
    pub request: LogoRequest,
    /// Loaded logo, `None` when the read failed
    pub logo: Option<Logo>,
}

/// Issues logo reads and filters out superseded completions
#[derive(Debug, Clone, Default)]
pub struct LogoLoader {
    latest: Arc<AtomicU64>,
}

impl LogoLoader {
    /// Create a loader with no request issued yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new read; every earlier request becomes stale.
    pub fn begin(&self) -> LogoRequest {
        LogoRequest(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `request` is still the most recent one issued
    pub fn is_current(&self, request: LogoRequest) -> bool {
        self.latest.load(Ordering::SeqCst) == request.0
    }

    /// Read the selected file, if any, and tag the result.
    ///
    /// Returns `None` without issuing a request when nothing was selected.
    /// Read failures are logged and surface as a completion without a logo.
    pub async fn load(&self, path: Option<&Path>) -> Option<LogoCompletion> {
        let path = path?;
        let request = self.begin();
        let logo = read_logo(path).await;
        Some(LogoCompletion { request, logo })
    }

    /// Accept a completion if it belongs to the latest request and carries a logo.
    pub fn accept(&self, completion: LogoCompletion) -> Option<Logo> {
        if !self.is_current(completion.request) {
            tracing::debug!(
                request = completion.request.0,
                "Discarding logo read superseded by a newer selection"
            );
            return None;
        }
        completion.logo
    }
}

async fn read_logo(path: &Path) -> Option<Logo> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let logo = Logo::from_bytes(&bytes);
            tracing::debug!(
                path = %path.display(),
                mime = logo.mime_type(),
                bytes = bytes.len(),
                "Logo loaded"
            );
            Some(logo)
        }
        Err(err) => {
            tracing::warn!("Failed to read logo {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn png_bytes_become_png_data_url() {
        let bytes = png_bytes();
        let logo = Logo::from_bytes(&bytes);
        assert!(logo.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(logo.mime_type(), "image/png");
        assert_eq!(logo.decode_bytes().unwrap(), bytes);
        assert_eq!(logo.decode_image().unwrap().width(), 4);
    }

    #[test]
    fn unknown_bytes_use_fallback_mime() {
        let logo = Logo::from_bytes(b"just some text");
        assert_eq!(logo.mime_type(), FALLBACK_MIME);
        assert!(logo.decode_image().is_err());
    }

    #[test]
    fn malformed_data_urls_are_rejected() {
        assert!(Logo::from_data_url("image/png;base64,AAAA").is_err());
        assert!(Logo::from_data_url("data:image/png;base64").is_err());
        assert!(Logo::from_data_url("data:text/plain,hello").is_err());
        assert!(Logo::from_data_url("data:image/png;base64,AAAA").is_ok());
    }

    #[test]
    fn newer_request_supersedes_older() {
        let loader = LogoLoader::new();
        let first = loader.begin();
        let second = loader.begin();
        assert!(first < second);

        let stale = LogoCompletion {
            request: first,
            logo: Some(Logo::from_bytes(b"old")),
        };
        assert!(loader.accept(stale).is_none());

        let fresh = LogoCompletion {
            request: second,
            logo: Some(Logo::from_bytes(b"new")),
        };
        assert_eq!(loader.accept(fresh), Some(Logo::from_bytes(b"new")));
    }

    #[tokio::test]
    async fn no_selection_is_a_noop() {
        let loader = LogoLoader::new();
        assert!(loader.load(None).await.is_none());
        // No request issued, so the first real request is id 1.
        assert_eq!(loader.begin(), LogoRequest(1));
    }

    #[tokio::test]
    async fn unreadable_file_yields_no_logo() {
        let loader = LogoLoader::new();
        let dir = tempfile::tempdir().unwrap();
        let completion = loader
            .load(Some(dir.path().join("missing.png").as_path()))
            .await
            .unwrap();
        assert!(loader.accept(completion).is_none());
    }

    #[tokio::test]
    async fn reads_file_into_logo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes()).unwrap();

        let loader = LogoLoader::new();
        let completion = loader.load(Some(path.as_path())).await.unwrap();
        let logo = loader.accept(completion).unwrap();
        assert_eq!(logo.mime_type(), "image/png");
    }
}
