//! QR code encoding and decoding
//!
//! Encoding produces a [`Symbol`], the bare module grid the preview renderer
//! draws. Decoding reads a rendered bitmap back and is used to check that
//! an export is still scannable once a logo covers its center.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;

use qrcode::{Color, EcLevel, QrCode, Version};
use std::fmt;

/// An encoded QR symbol: a square grid of dark and light modules
#[derive(Clone)]
pub struct Symbol {
    code: QrCode,
    payload: String,
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("payload", &self.payload)
            .field("version", &self.version_label())
            .field("width", &self.width())
            .finish()
    }
}

impl Symbol {
    pub(crate) fn new(code: QrCode, payload: String) -> Self {
        Self { code, payload }
    }

    /// Payload the symbol encodes
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Number of modules per side, without quiet zone
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.code[(x, y)] == Color::Dark
    }

    /// Error correction level the symbol was encoded with
    pub fn ec_level(&self) -> EcLevel {
        self.code.error_correction_level()
    }

    /// Symbol version as a display string (`"3"`, `"M2"`)
    pub fn version_label(&self) -> String {
        match self.code.version() {
            Version::Normal(v) => v.to_string(),
            Version::Micro(v) => format!("M{v}"),
        }
    }

    /// Underlying encoder output, for renderers that draw it directly
    pub fn code(&self) -> &QrCode {
        &self.code
    }
}

/// Short label for an error correction level
pub fn ec_level_label(level: EcLevel) -> &'static str {
    match level {
        EcLevel::L => "L",
        EcLevel::M => "M",
        EcLevel::Q => "Q",
        EcLevel::H => "H",
    }
}
