//! The studio: state, live preview and exports wired together

use crate::color::QrColor;
use crate::config::QrcraftConfig;
use crate::error::Result;
use crate::export::Exporter;
use crate::logo::{Logo, LogoCompletion, LogoLoader};
use crate::preview::{Layout, Preview, RenderMode};
use crate::qr::{QrDecoder, QrEncoder};
use crate::state::StudioState;
use std::path::{Path, PathBuf};

/// Owns the current inputs and keeps the preview in sync with them.
///
/// Every transition re-renders the preview. If the payload cannot be
/// encoded the preview is unmounted (exports become no-ops) and the
/// encoding error is returned; the new state is kept either way.
pub struct Studio {
    state: StudioState,
    layout: Layout,
    mode: RenderMode,
    encoder: QrEncoder,
    exporter: Exporter,
    loader: LogoLoader,
    preview: Option<Preview>,
}

impl Studio {
    /// Build a studio from configuration and render the initial preview.
    pub fn new(config: &QrcraftConfig) -> Result<Self> {
        let mut studio = Self {
            state: StudioState::new(config.style.default_color),
            layout: config.layout()?,
            mode: RenderMode::Vector,
            encoder: QrEncoder::new(),
            exporter: Exporter::new(config.export.output_dir.clone()),
            loader: LogoLoader::new(),
            preview: None,
        };
        studio.rerender()?;
        Ok(studio)
    }

    /// Switch the renderer output mode and re-render.
    pub fn set_render_mode(&mut self, mode: RenderMode) -> Result<()> {
        self.mode = mode;
        self.rerender()
    }

    /// Current inputs
    pub fn state(&self) -> &StudioState {
        &self.state
    }

    /// Current preview, `None` when the payload could not be rendered
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Logo loader, for callers driving reads themselves
    pub fn loader(&self) -> &LogoLoader {
        &self.loader
    }

    /// Directory exports are written into
    pub fn output_dir(&self) -> &Path {
        self.exporter.output_dir()
    }

    /// Edit the free text (ignored while a phone number is set)
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.transition(|state| state.with_text(text))
    }

    /// Edit the phone number; empty clears it
    pub fn set_phone(&mut self, phone: impl Into<String>) -> Result<()> {
        self.transition(|state| state.with_phone(phone))
    }

    /// Pick a new foreground color
    pub fn set_color(&mut self, color: QrColor) -> Result<()> {
        self.transition(|state| state.with_color(color))
    }

    /// Replace the logo
    pub fn set_logo(&mut self, logo: Logo) -> Result<()> {
        self.transition(|state| state.with_logo(logo))
    }

    /// Remove the logo
    pub fn clear_logo(&mut self) -> Result<()> {
        self.transition(StudioState::without_logo)
    }

    /// Read the selected file and install it as the logo.
    ///
    /// No selection, a failed read, or a read superseded by a newer selection
    /// leave the state untouched. Returns whether a logo was installed.
    pub async fn load_logo(&mut self, path: Option<&Path>) -> Result<bool> {
        match self.loader.load(path).await {
            Some(completion) => self.complete_logo(completion),
            None => Ok(false),
        }
    }

    /// Apply a finished logo read if it is still the latest one.
    pub fn complete_logo(&mut self, completion: LogoCompletion) -> Result<bool> {
        match self.loader.accept(completion) {
            Some(logo) => {
                self.set_logo(logo)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Export the current preview as `qrcode.png`.
    pub async fn export_png(&self) -> Result<Option<PathBuf>> {
        self.exporter.export_png(self.preview.as_ref()).await
    }

    /// Export the current preview as `qrcode.svg`.
    pub async fn export_svg(&self) -> Result<Option<PathBuf>> {
        self.exporter.export_svg(self.preview.as_ref()).await
    }

    /// Decode the rasterized region and check it carries the payload.
    ///
    /// Returns `Ok(false)` when there is no preview to check.
    pub fn verify(&self) -> Result<bool> {
        let Some(preview) = self.preview.as_ref() else {
            return Ok(false);
        };
        let raster = image::DynamicImage::ImageRgba8(preview.rasterize());
        QrDecoder::new().verify(&raster, preview.symbol().payload())?;
        Ok(true)
    }

    fn transition(&mut self, step: impl FnOnce(StudioState) -> StudioState) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        self.state = step(state);
        self.rerender()
    }

    fn rerender(&mut self) -> Result<()> {
        match Preview::render_with_mode(&self.state, self.layout, &self.encoder, self.mode) {
            Ok(preview) => {
                self.preview = Some(preview);
                Ok(())
            }
            Err(err) => {
                self.preview = None;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::payload::DEFAULT_PAYLOAD;

    fn studio() -> Studio {
        Studio::new(&QrcraftConfig::default()).unwrap()
    }

    #[test]
    fn starts_with_placeholder_preview() {
        let studio = studio();
        let preview = studio.preview().unwrap();
        assert_eq!(preview.symbol().payload(), DEFAULT_PAYLOAD);
    }

    #[test]
    fn every_transition_rerenders() {
        let mut studio = studio();
        studio.set_text("https://example.org").unwrap();
        assert_eq!(studio.preview().unwrap().symbol().payload(), "https://example.org");

        studio.set_phone("+33612345678").unwrap();
        assert_eq!(studio.preview().unwrap().symbol().payload(), "tel:+33612345678");

        let black = QrColor::rgb(0, 0, 0);
        studio.set_color(black).unwrap();
        let preview = studio.preview().unwrap();
        assert_eq!(preview.color(), black);
        assert_eq!(preview.symbol().payload(), "tel:+33612345678");
    }

    #[test]
    fn unencodable_payload_unmounts_preview() {
        let mut studio = studio();
        let err = studio.set_text("x".repeat(4000)).unwrap_err();
        assert!(matches!(err, Error::QrEncode(_)));
        assert!(studio.preview().is_none());

        studio.set_text("short again").unwrap();
        assert!(studio.preview().is_some());
    }

    #[tokio::test]
    async fn stale_logo_completion_is_ignored() {
        let mut studio = studio();
        let old = studio.loader().begin();
        let new = studio.loader().begin();

        let applied = studio
            .complete_logo(LogoCompletion {
                request: new,
                logo: Some(Logo::from_bytes(b"new")),
            })
            .unwrap();
        assert!(applied);

        let applied = studio
            .complete_logo(LogoCompletion {
                request: old,
                logo: Some(Logo::from_bytes(b"old")),
            })
            .unwrap();
        assert!(!applied);
        assert_eq!(studio.state().logo(), Some(&Logo::from_bytes(b"new")));
    }

    #[tokio::test]
    async fn missing_selection_leaves_logo_alone() {
        let mut studio = studio();
        assert!(!studio.load_logo(None).await.unwrap());
        assert!(studio.state().logo().is_none());
    }

    #[test]
    fn render_mode_survives_later_transitions() {
        let mut studio = studio();
        studio.set_render_mode(RenderMode::Raster).unwrap();
        studio.set_text("https://example.org").unwrap();

        let preview = studio.preview().unwrap();
        assert_eq!(preview.mode(), RenderMode::Raster);
        assert!(preview.vector_markup().is_none());
    }

    #[test]
    fn verify_reads_back_payload() {
        let mut studio = studio();
        studio.set_text("https://example.org").unwrap();
        assert!(studio.verify().unwrap());
    }
}
