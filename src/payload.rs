//! Payload resolution
//!
//! A phone number always wins over free text; with neither, the symbol
//! encodes a placeholder URL so the preview is never empty.

/// Payload encoded when both inputs are empty
pub const DEFAULT_PAYLOAD: &str = "https://exemple.com";

/// URI scheme prepended to phone numbers
pub const TEL_SCHEME: &str = "tel:";

/// Example shown next to the phone input
pub const PHONE_HINT: &str = "+33612345678";

/// Resolve the string the QR symbol encodes.
///
/// The phone number is passed through verbatim; no digit or country-code
/// validation happens here.
pub fn resolve(free_text: &str, phone_number: &str) -> String {
    if !phone_number.is_empty() {
        return format!("{TEL_SCHEME}{phone_number}");
    }
    if !free_text.is_empty() {
        return free_text.to_string();
    }
    DEFAULT_PAYLOAD.to_string()
}

/// Whether the free-text input accepts edits for the given phone value.
pub fn text_input_enabled(phone_number: &str) -> bool {
    phone_number.is_empty()
}
