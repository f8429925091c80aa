//! Preview rendering
//!
//! A [`Preview`] is the rendered "preview region": the symbol drawn at a
//! fixed size in the selected color, surrounded by a white margin, with the
//! optional logo centered on an opaque rounded patch. It is rebuilt from the
//! studio state on every change; nothing is cached between renders.

mod raster;
mod svg;
mod terminal;

use crate::color::QrColor;
use crate::error::Result;
use crate::qr::{QrEncoder, Symbol};
use crate::state::StudioState;
use image::{DynamicImage, RgbaImage};

/// Pixel geometry of the preview region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Side of the drawn symbol
    pub symbol_size: u32,
    /// White margin on each side of the symbol
    pub margin: u32,
    /// Outer side of the logo patch
    pub logo_size: u32,
    /// Padding between the patch edge and the logo image
    pub logo_padding: u32,
    /// Corner radius of the logo patch
    pub logo_corner_radius: u32,
}

impl Layout {
    /// Side of the whole region (symbol plus both margins)
    pub fn region_size(&self) -> u32 {
        self.symbol_size
            .saturating_add(self.margin.saturating_mul(2))
    }

    /// Top-left corner of the logo patch within the region
    pub fn logo_origin(&self) -> (u32, u32) {
        let offset = self
            .margin
            .saturating_add(self.symbol_size.saturating_sub(self.logo_size) / 2);
        (offset, offset)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            symbol_size: 256,
            margin: 32,
            logo_size: 64,
            logo_padding: 4,
            logo_corner_radius: 8,
        }
    }
}

/// What the symbol renderer emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderMode {
    /// Vector markup, rasterizable on demand
    #[default]
    Vector,
    /// Bitmap only; no markup is available for SVG export
    Raster,
}

impl RenderMode {
    /// Lowercase name, as accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Vector => "vector",
            RenderMode::Raster => "raster",
        }
    }

    /// Parse a mode name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vector" => Some(RenderMode::Vector),
            "raster" => Some(RenderMode::Raster),
            _ => None,
        }
    }
}

/// Logo drawn over the symbol center
#[derive(Debug, Clone)]
pub struct LogoOverlay {
    /// Decoded image, `None` when the logo bytes are not a readable image
    pub image: Option<DynamicImage>,
}

/// A rendered preview region
#[derive(Debug, Clone)]
pub struct Preview {
    symbol: Symbol,
    color: QrColor,
    layout: Layout,
    logo: Option<LogoOverlay>,
    mode: RenderMode,
}

impl Preview {
    /// Render the current state as vector output.
    pub fn render(state: &StudioState, layout: Layout, encoder: &QrEncoder) -> Result<Self> {
        Self::render_with_mode(state, layout, encoder, RenderMode::Vector)
    }

    /// Render the current state with an explicit output mode.
    pub fn render_with_mode(
        state: &StudioState,
        layout: Layout,
        encoder: &QrEncoder,
        mode: RenderMode,
    ) -> Result<Self> {
        let symbol = encoder.encode(&state.payload())?;

        let logo = state.logo().map(|logo| {
            let image = match logo.decode_image() {
                Ok(image) => Some(image),
                Err(err) => {
                    tracing::warn!("Logo is not a readable image, drawing its patch only: {err}");
                    None
                }
            };
            LogoOverlay { image }
        });

        tracing::debug!(
            payload = symbol.payload(),
            modules = symbol.width(),
            color = %state.color(),
            logo = logo.is_some(),
            "Rendered preview"
        );

        Ok(Self {
            symbol,
            color: state.color(),
            layout,
            logo,
            mode,
        })
    }

    /// Encoded symbol
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Foreground color
    pub fn color(&self) -> QrColor {
        self.color
    }

    /// Region geometry
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Logo overlay, if a logo is set
    pub fn logo(&self) -> Option<&LogoOverlay> {
        self.logo.as_ref()
    }

    /// Output mode the preview was rendered with
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Draw the whole region (margin, symbol, logo) as a bitmap.
    pub fn rasterize(&self) -> RgbaImage {
        raster::draw_region(self)
    }

    /// SVG markup of the symbol, if the renderer produced vector output.
    pub fn vector_markup(&self) -> Option<String> {
        match self.mode {
            RenderMode::Vector => Some(svg::symbol_markup(&self.symbol, self.color, self.layout)),
            RenderMode::Raster => None,
        }
    }

    /// Compact Unicode rendering for terminals
    pub fn terminal(&self) -> String {
        terminal::render(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::Logo;

    #[test]
    fn logo_patch_is_centered() {
        let layout = Layout::default();
        assert_eq!(layout.region_size(), 320);
        // 32 margin + (256 - 64) / 2
        assert_eq!(layout.logo_origin(), (128, 128));
    }

    #[test]
    fn extreme_layout_saturates_instead_of_overflowing() {
        let layout = Layout {
            symbol_size: u32::MAX,
            margin: u32::MAX,
            logo_size: 64,
            ..Layout::default()
        };
        assert_eq!(layout.region_size(), u32::MAX);
        assert_eq!(layout.logo_origin().0, u32::MAX);
    }

    #[test]
    fn raster_mode_has_no_markup() {
        let state = StudioState::default();
        let preview = Preview::render_with_mode(
            &state,
            Layout::default(),
            &QrEncoder::new(),
            RenderMode::Raster,
        )
        .unwrap();
        assert!(preview.vector_markup().is_none());

        let preview = Preview::render(&state, Layout::default(), &QrEncoder::new()).unwrap();
        assert!(preview.vector_markup().is_some());
    }

    #[test]
    fn undecodable_logo_keeps_patch_without_image() {
        let state = StudioState::default().with_logo(Logo::from_bytes(b"not an image"));
        let preview = Preview::render(&state, Layout::default(), &QrEncoder::new()).unwrap();
        let overlay = preview.logo().unwrap();
        assert!(overlay.image.is_none());
    }

    #[test]
    fn preview_follows_state_payload() {
        let state = StudioState::default().with_phone("+33612345678");
        let preview = Preview::render(&state, Layout::default(), &QrEncoder::new()).unwrap();
        assert_eq!(preview.symbol().payload(), "tel:+33612345678");
    }
}
