//! qrcraft - custom QR code studio
//!
//! Renders a QR code for a free-text or phone-number payload in a chosen
//! color, optionally with a logo over its center, and exports it as
//! `qrcode.png` or `qrcode.svg`.
//!
//! # Features
//!
//! - **Payload resolution**: a phone number becomes a `tel:` URI and takes
//!   priority over free text; with neither, a placeholder URL is encoded
//! - **Logo overlay**: High error correction keeps the symbol scannable
//!   under a centered logo
//! - **Exports**: opaque PNG of the whole preview region, SVG of the symbol
//! - **Verification**: decode the rendered bitmap back to check the payload
//!
//! # Example
//!
//! ```no_run
//! use qrcraft::{QrColor, QrcraftConfig, Studio};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut studio = Studio::new(&QrcraftConfig::default())?;
//!     studio.set_text("https://example.org")?;
//!     studio.set_color(QrColor::parse("#1D4ED8")?)?;
//!     studio.load_logo(Some("logo.png".as_ref())).await?;
//!
//!     if let Some(path) = studio.export_png().await? {
//!         println!("Saved {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod logo;
pub mod output;
pub mod payload;
pub mod preview;
pub mod qr;
pub mod session;
pub mod state;
pub mod studio;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::QrColor;
pub use config::{ExportOptions, LogRotation, LoggingOptions, QrcraftConfig, StyleOptions};
pub use export::{Exporter, PNG_FILE_NAME, SVG_FILE_NAME};
pub use logo::{Logo, LogoLoader};
pub use preview::{Layout, Preview, RenderMode};
pub use qr::{QrDecoder, QrEncoder, Symbol};
pub use state::StudioState;
pub use studio::Studio;
