//! Helpers for rendering the preview summary

use crate::payload::PHONE_HINT;
use crate::preview::Preview;
use crate::qr::ec_level_label;
use crate::state::StudioState;
use serde_json::{Map, Value, json};

/// Combined structured and human-readable representation of the studio
#[derive(Debug, Clone)]
pub struct RenderedSummary {
    /// Structured JSON representation suitable for scripting
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render the current inputs and preview into both JSON and human-readable forms.
pub fn render_summary(state: &StudioState, preview: Option<&Preview>) -> RenderedSummary {
    let json = summary_value(state, preview);
    let mut human = Vec::new();

    human.push("QR code content:".to_string());
    human.push(format!("  {}", state.payload()));
    human.push(format!("  Color: {}", state.color()));
    match state.logo() {
        Some(logo) => human.push(format!("  Logo: {logo}")),
        None => human.push("  Logo: none".to_string()),
    }
    if state.text_input_enabled() {
        human.push(format!("  Phone: not set (e.g. {PHONE_HINT}, takes priority over text)"));
    } else {
        human.push(format!(
            "  Text input disabled: phone number {} takes priority",
            state.phone()
        ));
    }

    match preview {
        Some(preview) => {
            let symbol = preview.symbol();
            human.push(format!(
                "  Symbol: version {}, {}x{} modules, EC level {}",
                symbol.version_label(),
                symbol.width(),
                symbol.width(),
                ec_level_label(symbol.ec_level())
            ));
            human.push(format!("  Render mode: {}", preview.mode().as_str()));
        }
        None => human.push("  Preview unavailable: payload cannot be encoded".to_string()),
    }

    RenderedSummary { json, human }
}

/// Produce a structured JSON representation of the studio.
pub fn summary_value(state: &StudioState, preview: Option<&Preview>) -> Value {
    let mut root = Map::new();
    root.insert("payload".to_string(), Value::String(state.payload()));
    root.insert("color".to_string(), Value::String(state.color().to_hex()));
    root.insert(
        "text_input_enabled".to_string(),
        Value::Bool(state.text_input_enabled()),
    );
    root.insert(
        "logo".to_string(),
        match state.logo() {
            Some(logo) => json!({
                "mime_type": logo.mime_type(),
                "data_url_length": logo.data_url().len(),
            }),
            None => Value::Null,
        },
    );

    match preview {
        Some(preview) => {
            let symbol = preview.symbol();
            let layout = preview.layout();
            root.insert(
                "symbol".to_string(),
                json!({
                    "version": symbol.version_label(),
                    "modules": symbol.width(),
                    "ec_level": ec_level_label(symbol.ec_level()),
                    "size_px": layout.symbol_size,
                    "region_px": layout.region_size(),
                    "mode": preview.mode().as_str(),
                }),
            );
        }
        None => {
            root.insert("symbol".to_string(), Value::Null);
        }
    }

    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::Logo;
    use crate::preview::Layout;
    use crate::qr::QrEncoder;

    #[test]
    fn renders_phone_payload_consistently() {
        let state = StudioState::default()
            .with_text("ignored")
            .with_phone("+33612345678");
        let preview = Preview::render(&state, Layout::default(), &QrEncoder::new()).unwrap();
        let rendered = render_summary(&state, Some(&preview));

        assert_eq!(rendered.json["payload"], "tel:+33612345678");
        assert_eq!(rendered.json["text_input_enabled"], false);
        assert_eq!(rendered.json["color"], "#DC2626");
        assert_eq!(rendered.json["symbol"]["ec_level"], "H");
        assert_eq!(rendered.json["symbol"]["region_px"], 320);
        assert_eq!(rendered.json["symbol"]["mode"], "vector");
        assert!(rendered.json["logo"].is_null());

        assert!(rendered.human.iter().any(|line| line == "  tel:+33612345678"));
        assert!(
            rendered
                .human
                .iter()
                .any(|line| line.contains("Text input disabled"))
        );
    }

    #[test]
    fn reports_logo_and_missing_preview() {
        let state = StudioState::default().with_logo(Logo::from_bytes(b"abc"));
        let rendered = render_summary(&state, None);

        assert_eq!(rendered.json["logo"]["mime_type"], "application/octet-stream");
        assert!(rendered.json["symbol"].is_null());
        assert!(
            rendered
                .human
                .iter()
                .any(|line| line.contains("Preview unavailable"))
        );
    }
}
