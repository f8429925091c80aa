//! Vector markup for the symbol
//!
//! The markup covers the symbol only (no margin, no logo), drawn in module
//! units and scaled to the configured pixel size through `viewBox`.

use super::Layout;
use crate::color::QrColor;
use crate::qr::Symbol;
use std::fmt::Write as _;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub(super) fn symbol_markup(symbol: &Symbol, color: QrColor, layout: Layout) -> String {
    let modules = symbol.width();
    let mut out = String::with_capacity(modules * modules);

    let _ = write!(
        out,
        r#"<svg xmlns="{SVG_NS}" width="{size}" height="{size}" viewBox="0 0 {modules} {modules}" shape-rendering="crispEdges">"#,
        size = layout.symbol_size,
    );
    let _ = write!(
        out,
        r#"<path fill="{}" d="M0 0h{modules}v{modules}H0z"/>"#,
        QrColor::WHITE
    );
    let _ = write!(out, r#"<path fill="{color}" d="{}"/>"#, dark_path(symbol));
    out.push_str("</svg>");
    out
}

/// Path data with one rectangle per horizontal run of dark modules.
fn dark_path(symbol: &Symbol) -> String {
    let modules = symbol.width();
    let mut d = String::new();

    for y in 0..modules {
        let mut x = 0;
        while x < modules {
            if !symbol.is_dark(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < modules && symbol.is_dark(x, y) {
                x += 1;
            }
            let run = x - start;
            let _ = write!(d, "M{start} {y}h{run}v1h-{run}z");
        }
    }

    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrEncoder;

    /// Read the dark path back into a module grid.
    fn parse_dark_path(d: &str, modules: usize) -> Vec<Vec<bool>> {
        let mut grid = vec![vec![false; modules]; modules];
        for segment in d.split('z').filter(|s| !s.is_empty()) {
            let body = segment.strip_prefix('M').expect("segment starts with M");
            let (origin, rest) = body.split_once('h').expect("horizontal run");
            let (x, y) = origin.split_once(' ').expect("x y origin");
            let run = rest.split_once('v').expect("vertical step").0;
            let (x, y, run): (usize, usize, usize) =
                (x.parse().unwrap(), y.parse().unwrap(), run.parse().unwrap());
            for cell in &mut grid[y][x..x + run] {
                *cell = true;
            }
        }
        grid
    }

    #[test]
    fn markup_declares_size_and_namespace() {
        let symbol = QrEncoder::new().encode("https://example.org").unwrap();
        let markup = symbol_markup(&symbol, QrColor::rgb(0xDC, 0x26, 0x26), Layout::default());
        let n = symbol.width();

        assert!(markup.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="256" height="256""#));
        assert!(markup.contains(&format!(r#"viewBox="0 0 {n} {n}""#)));
        assert!(markup.contains(r##"fill="#FFFFFF""##));
        assert!(markup.contains(r##"fill="#DC2626""##));
        assert!(markup.ends_with("</svg>"));
        assert_eq!(markup.matches("<path").count(), 2);
    }

    #[test]
    fn dark_path_reproduces_modules() {
        let symbol = QrEncoder::new().encode("tel:+33612345678").unwrap();
        let n = symbol.width();
        let grid = parse_dark_path(&dark_path(&symbol), n);

        for y in 0..n {
            for x in 0..n {
                assert_eq!(grid[y][x], symbol.is_dark(x, y), "module ({x}, {y})");
            }
        }
    }
}
