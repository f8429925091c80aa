//! Error types for qrcraft operations

use thiserror::Error;

/// Result type alias using qrcraft's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrcraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Color value could not be parsed
    #[error("Invalid color '{0}', expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// Logo data URL is malformed
    #[error("Invalid logo data URL: {0}")]
    InvalidDataUrl(String),

    /// Layout parameters are out of range
    #[error("Invalid layout: {0}")]
    Layout(String),

    /// Rendered export does not carry the expected payload
    #[error("Verification failed: expected '{expected}', decoded '{decoded}'")]
    Verification {
        /// Payload the preview was rendered for
        expected: String,
        /// Text read back from the raster
        decoded: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::InvalidDataUrl(format!("base64 decode error: {}", e))
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}
