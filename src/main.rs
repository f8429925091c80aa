//! qrcraft command-line entrypoint

use clap::Parser;
use qrcraft::output::render_summary;
use qrcraft::preview::RenderMode;
use qrcraft::session::{self, SessionOptions};
use qrcraft::{QrColor, QrcraftConfig, Result, Studio, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrcraft",
    version,
    about = "Generate custom QR codes with colors and logos, export PNG or SVG"
)]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrcraft.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Free text to encode (ignored when --phone is given)
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Phone number to encode as a tel: URI, e.g. +33612345678
    #[arg(long, value_name = "NUMBER")]
    phone: Option<String>,

    /// Foreground color as #RGB or #RRGGBB
    #[arg(long, value_name = "HEX")]
    color: Option<String>,

    /// Image to place over the center of the code
    #[arg(long, value_name = "PATH")]
    logo: Option<PathBuf>,

    /// Export qrcode.png
    #[arg(long)]
    png: bool,

    /// Export qrcode.svg
    #[arg(long)]
    svg: bool,

    /// Renderer output; `raster` produces no vector markup, so --svg does nothing
    #[arg(long, value_enum, default_value_t = RenderMode::Vector)]
    mode: RenderMode,

    /// Directory to write exports into (overrides configuration)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the summary as JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Decode the rendered code and fail if it does not carry the payload
    #[arg(long)]
    verify: bool,

    /// Start an interactive session reading commands from stdin
    #[arg(long)]
    interactive: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrcraftConfig::load(cli.config.as_deref())?;

    if let Some(ref dir) = cli.out_dir {
        config.export.output_dir = dir.clone();
    }

    if let Some(ref color) = cli.color {
        config.style.default_color = QrColor::parse(color)?;
    }

    logging::init(&config.logging)?;

    let mut studio = Studio::new(&config)?;
    if cli.mode != RenderMode::Vector {
        studio.set_render_mode(cli.mode)?;
    }

    if let Some(ref phone) = cli.phone {
        studio.set_phone(phone.clone())?;
    }
    if let Some(ref text) = cli.text {
        if !studio.state().text_input_enabled() {
            info!("--text ignored: --phone takes priority");
        }
        studio.set_text(text.clone())?;
    }
    // An unreadable logo leaves the code without one; the loader logs why.
    studio.load_logo(cli.logo.as_deref()).await?;

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        return session::run(
            &mut studio,
            stdin,
            &mut stdout,
            SessionOptions { json: cli.json },
        )
        .await;
    }

    if cli.verify {
        studio.verify()?;
        info!("Rendered code decodes back to its payload");
    }

    let rendered = render_summary(studio.state(), studio.preview());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rendered.json)?);
    } else {
        for line in &rendered.human {
            println!("{line}");
        }
        if !cli.png && !cli.svg {
            if let Some(preview) = studio.preview() {
                println!();
                println!("{}", preview.terminal());
            }
        }
    }

    if cli.png {
        if let Some(path) = studio.export_png().await? {
            if !cli.json {
                println!("Saved {}", path.display());
            }
        }
    }
    if cli.svg {
        if let Some(path) = studio.export_svg().await? {
            if !cli.json {
                println!("Saved {}", path.display());
            }
        }
    }

    Ok(())
}
