//! Terminal preview using Unicode half blocks

use crate::qr::Symbol;
use qrcode::render::unicode;

/// Two modules per character cell, light-on-dark so it reads on dark terminals.
pub(super) fn render(symbol: &Symbol) -> String {
    symbol
        .code()
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build()
}
