//! Studio state
//!
//! The form inputs live in one immutable record. Each field changes through
//! its own transition, which returns a new record.

use crate::color::QrColor;
use crate::logo::Logo;
use crate::payload;

/// Current inputs of the studio
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudioState {
    text: String,
    phone: String,
    color: QrColor,
    logo: Option<Logo>,
}

impl StudioState {
    /// Fresh state with the given foreground color
    pub fn new(color: QrColor) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Replace the free text.
    ///
    /// Ignored while a phone number is set: the text input is disabled then.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        if !self.text_input_enabled() {
            tracing::debug!("Text input disabled while a phone number is set; edit ignored");
            return self;
        }
        Self {
            text: text.into(),
            ..self
        }
    }

    /// Replace the phone number; an empty string clears it.
    #[must_use]
    pub fn with_phone(self, phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            ..self
        }
    }

    /// Replace the foreground color
    #[must_use]
    pub fn with_color(self, color: QrColor) -> Self {
        Self { color, ..self }
    }

    /// Replace the logo
    #[must_use]
    pub fn with_logo(self, logo: Logo) -> Self {
        Self {
            logo: Some(logo),
            ..self
        }
    }

    /// Remove the logo
    #[must_use]
    pub fn without_logo(self) -> Self {
        Self { logo: None, ..self }
    }

    /// Stored free text (kept even while ignored)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stored phone number
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Foreground color
    pub fn color(&self) -> QrColor {
        self.color
    }

    /// Active logo, if any
    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    /// Whether the free-text input accepts edits
    pub fn text_input_enabled(&self) -> bool {
        payload::text_input_enabled(&self.phone)
    }

    /// String encoded by the symbol
    pub fn payload(&self) -> String {
        payload::resolve(&self.text, &self.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use crate::payload::DEFAULT_PAYLOAD;

    #[test]
    fn fresh_state_uses_placeholder_and_default_color() {
        let state = StudioState::default();
        assert_eq!(state.payload(), DEFAULT_PAYLOAD);
        assert_eq!(state.color(), DEFAULT_COLOR);
        assert!(state.logo().is_none());
        assert!(state.text_input_enabled());
    }

    #[test]
    fn phone_disables_text_and_wins() {
        let state = StudioState::default()
            .with_text("ignored")
            .with_phone("+33612345678");
        assert_eq!(state.payload(), "tel:+33612345678");
        assert!(!state.text_input_enabled());

        let state = state.with_text("changed while disabled");
        assert_eq!(state.text(), "ignored");
    }

    #[test]
    fn clearing_phone_restores_text() {
        let state = StudioState::default()
            .with_text("https://example.org")
            .with_phone("+1")
            .with_phone("");
        assert_eq!(state.payload(), "https://example.org");
        assert!(state.text_input_enabled());
    }

    #[test]
    fn color_change_leaves_payload_and_logo() {
        let logo = Logo::from_bytes(b"logo");
        let before = StudioState::default()
            .with_text("hello")
            .with_logo(logo.clone());
        let after = before.clone().with_color(QrColor::rgb(0, 0, 0));

        assert_eq!(after.payload(), before.payload());
        assert_eq!(after.logo(), Some(&logo));
        assert_eq!(after.color(), QrColor::rgb(0, 0, 0));
    }

    #[test]
    fn second_logo_replaces_first() {
        let state = StudioState::default()
            .with_logo(Logo::from_bytes(b"first"))
            .with_logo(Logo::from_bytes(b"second"));
        assert_eq!(state.logo(), Some(&Logo::from_bytes(b"second")));

        assert!(state.without_logo().logo().is_none());
    }
}
