//! Interactive studio session
//!
//! Reads one command per line and applies it to a [`Studio`]. Everything
//! runs on one task; logo reads are spawned and resume into the loop
//! through a channel, where the loader drops completions that a newer
//! selection has superseded.

use crate::color::QrColor;
use crate::error::Result;
use crate::logo::LogoCompletion;
use crate::output::render_summary;
use crate::preview::RenderMode;
use crate::studio::Studio;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

const HELP: &str = "\
Commands:
  text <value>     set the free text (disabled while a phone number is set)
  phone [number]   set the phone number; without a number, clear it
  color <#hex>     set the foreground color
  logo <path>      load a logo image; `logo clear` removes it
  mode <name>      render as `vector` or `raster` (raster has no SVG export)
  png              export qrcode.png
  svg              export qrcode.svg
  show             print the summary and a terminal preview
  help             show this help
  quit             leave the session";

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the free text
    Text(String),
    /// Set or clear the phone number
    Phone(String),
    /// Set the foreground color
    Color(QrColor),
    /// Load a logo from disk
    Logo(PathBuf),
    /// Remove the logo
    ClearLogo,
    /// Switch the renderer output mode
    Mode(RenderMode),
    /// Export PNG
    Png,
    /// Export SVG
    Svg,
    /// Print the summary and terminal preview
    Show,
    /// Print help
    Help,
    /// End the session
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`; the error is a hint for the user.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "text" => Command::Text(rest.to_string()),
        "phone" => Command::Phone(rest.trim().to_string()),
        "color" => Command::Color(QrColor::parse(rest).map_err(|e| e.to_string())?),
        "logo" => match rest.trim() {
            "" => return Err("Usage: logo <path> | logo clear".to_string()),
            "clear" => Command::ClearLogo,
            path => Command::Logo(PathBuf::from(path)),
        },
        "mode" => match RenderMode::parse(rest) {
            Some(mode) => Command::Mode(mode),
            None => return Err("Usage: mode vector | mode raster".to_string()),
        },
        "png" => Command::Png,
        "svg" => Command::Svg,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{other}', type `help` for a list")),
    };
    Ok(Some(command))
}

/// Session output settings
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Print summaries as JSON lines
    pub json: bool,
}

/// Run the session until `quit`, or until input ends and pending logo reads finish.
pub async fn run<R, W>(
    studio: &mut Studio,
    input: R,
    out: &mut W,
    options: SessionOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let (tx, mut rx) = mpsc::unbounded_channel::<LogoCompletion>();
    let mut in_flight = 0usize;
    let mut input_open = true;

    writeln!(out, "Type `help` for commands.")?;
    print_summary(studio, out, options)?;

    loop {
        if !input_open && in_flight == 0 {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Logo(path))) => {
                        in_flight += 1;
                        let loader = studio.loader().clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            if let Some(completion) = loader.load(Some(path.as_path())).await {
                                let _ = tx.send(completion);
                            }
                        });
                    }
                    Ok(Some(command)) => handle(studio, command, out, options).await?,
                    Err(hint) => writeln!(out, "{hint}")?,
                }
            }
            Some(completion) = rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                match studio.complete_logo(completion) {
                    Ok(true) => print_summary(studio, out, options)?,
                    Ok(false) => writeln!(out, "Logo unchanged")?,
                    Err(err) => writeln!(out, "Error: {err}")?,
                }
            }
        }
    }

    Ok(())
}

async fn handle<W: Write>(
    studio: &mut Studio,
    command: Command,
    out: &mut W,
    options: SessionOptions,
) -> Result<()> {
    let changed = match command {
        Command::Text(text) => {
            if !studio.state().text_input_enabled() {
                writeln!(out, "Text input is disabled while a phone number is set")?;
                return Ok(());
            }
            studio.set_text(text)
        }
        Command::Phone(phone) => studio.set_phone(phone),
        Command::Color(color) => studio.set_color(color),
        Command::ClearLogo => studio.clear_logo(),
        Command::Mode(mode) => studio.set_render_mode(mode),
        Command::Png => {
            report_export(studio.export_png().await, out)?;
            return Ok(());
        }
        Command::Svg => {
            report_export(studio.export_svg().await, out)?;
            return Ok(());
        }
        Command::Show => {
            print_summary(studio, out, options)?;
            if let Some(preview) = studio.preview() {
                writeln!(out, "{}", preview.terminal())?;
            }
            return Ok(());
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
        // Handled by the event loop.
        Command::Logo(_) | Command::Quit => return Ok(()),
    };

    if let Err(err) = changed {
        writeln!(out, "Error: {err}")?;
    }
    print_summary(studio, out, options)
}

fn report_export<W: Write>(result: Result<Option<PathBuf>>, out: &mut W) -> Result<()> {
    match result {
        Ok(Some(path)) => writeln!(out, "Saved {}", path.display())?,
        // Nothing to export: stay silent.
        Ok(None) => {}
        Err(err) => writeln!(out, "Error: {err}")?,
    }
    Ok(())
}

fn print_summary<W: Write>(studio: &Studio, out: &mut W, options: SessionOptions) -> Result<()> {
    let rendered = render_summary(studio.state(), studio.preview());
    if options.json {
        writeln!(out, "{}", serde_json::to_string(&rendered.json)?)?;
    } else {
        for line in &rendered.human {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
