//! QR code encoder

use crate::error::Result;
use crate::qr::Symbol;
use qrcode::{EcLevel, QrCode};

/// QR code encoder
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
}

impl QrEncoder {
    /// Create a new QR encoder with High ECC.
    ///
    /// High correction leaves room for a logo over the center of the symbol.
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::H,
        }
    }

    /// Encode a payload string into a symbol
    pub fn encode(&self, payload: &str) -> Result<Symbol> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)?;
        tracing::trace!(width = code.width(), bytes = payload.len(), "Encoded QR symbol");
        Ok(Symbol::new(code, payload.to_string()))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
