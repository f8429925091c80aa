//! Drive the studio from code and export both formats
//!
//! Usage: cargo run --example export_qr -- [logo.png]

use qrcraft::{QrColor, QrcraftConfig, Studio};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = QrcraftConfig::default();
    config.export.output_dir = PathBuf::from("target/qrcraft-demo");
    let mut studio = Studio::new(&config)?;

    studio.set_text("https://example.org")?;
    studio.set_color(QrColor::parse("#1D4ED8")?)?;

    // Phone numbers win over free text.
    studio.set_phone("+33612345678")?;
    println!("Payload: {}", studio.state().payload());

    let logo = std::env::args().nth(1).map(PathBuf::from);
    if studio.load_logo(logo.as_deref()).await? {
        println!("✓ Logo placed over the center");
    }

    if studio.verify()? {
        println!("✓ Rendered code scans back to its payload");
    }

    if let Some(path) = studio.export_png().await? {
        println!("✓ Saved {}", path.display());
    }
    if let Some(path) = studio.export_svg().await? {
        println!("✓ Saved {}", path.display());
    }

    Ok(())
}
