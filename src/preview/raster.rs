//! Bitmap rendering of the preview region

use super::{Layout, LogoOverlay, Preview};
use crate::color::QrColor;
use crate::qr::Symbol;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

pub(super) fn draw_region(preview: &Preview) -> RgbaImage {
    let layout = preview.layout();
    let side = layout.region_size();
    let mut canvas = RgbaImage::from_pixel(side, side, QrColor::WHITE.to_rgba());

    draw_symbol(&mut canvas, preview.symbol(), preview.color(), layout);
    if let Some(logo) = preview.logo() {
        draw_logo(&mut canvas, logo, layout);
    }

    canvas
}

/// Pixel span `[start, end)` covered by module `index` along one axis.
///
/// Module edges are rounded down so the symbol fills `size` exactly even when
/// it is not a multiple of the module count.
fn module_span(index: usize, modules: usize, size: u32) -> (u32, u32) {
    let size = size as u64;
    let modules = modules as u64;
    let start = index as u64 * size / modules;
    let end = (index as u64 + 1) * size / modules;
    (start as u32, end as u32)
}

fn draw_symbol(canvas: &mut RgbaImage, symbol: &Symbol, color: QrColor, layout: Layout) {
    let modules = symbol.width();
    let dark = color.to_rgba();

    for y in 0..modules {
        let (y0, y1) = module_span(y, modules, layout.symbol_size);
        for x in 0..modules {
            if !symbol.is_dark(x, y) {
                continue;
            }
            let (x0, x1) = module_span(x, modules, layout.symbol_size);
            for py in y0..y1 {
                for px in x0..x1 {
                    canvas.put_pixel(layout.margin + px, layout.margin + py, dark);
                }
            }
        }
    }
}

fn draw_logo(canvas: &mut RgbaImage, logo: &LogoOverlay, layout: Layout) {
    let (left, top) = layout.logo_origin();
    let size = layout.logo_size;
    let radius = layout.logo_corner_radius;
    let white = QrColor::WHITE.to_rgba();

    for dy in 0..size {
        for dx in 0..size {
            if inside_rounded_square(dx, dy, size, radius) {
                canvas.put_pixel(left + dx, top + dy, white);
            }
        }
    }

    let Some(image) = logo.image.as_ref() else {
        return;
    };

    // Scale to fit the padded box, keeping the aspect ratio.
    let content = size - 2 * layout.logo_padding;
    let fitted = image.resize(content, content, FilterType::Lanczos3).to_rgba8();
    let x = left + layout.logo_padding + (content - fitted.width()) / 2;
    let y = top + layout.logo_padding + (content - fitted.height()) / 2;
    overlay(canvas, &fitted, x, y);
}

fn inside_rounded_square(x: u32, y: u32, size: u32, radius: u32) -> bool {
    if radius == 0 {
        return true;
    }
    let r = radius as i64;
    let last = size as i64 - 1;
    let (x, y) = (x as i64, y as i64);

    // Distance is measured from the center of the corner's arc.
    let cx = if x < r {
        r
    } else if x > last - r {
        last - r
    } else {
        return true;
    };
    let cy = if y < r {
        r
    } else if y > last - r {
        last - r
    } else {
        return true;
    };

    let (ddx, ddy) = (x - cx, y - cy);
    ddx * ddx + ddy * ddy <= r * r
}

/// Alpha-composite `top` onto `base` with its top-left corner at `(x, y)`.
fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x >= base.width() || target_y >= base.height() {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(target_x, target_y, Rgba([pixel[0], pixel[1], pixel[2], 255]));
        } else if alpha > 0.01 {
            let bg = *base.get_pixel(target_x, target_y);
            base.put_pixel(target_x, target_y, blend_pixel(&bg, pixel, alpha));
        }
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logo::Logo;
    use crate::qr::QrEncoder;
    use crate::state::StudioState;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn logo_png(color: [u8; 4], width: u32, height: u32) -> Logo {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        Logo::from_bytes(&bytes)
    }

    fn render(state: &StudioState) -> RgbaImage {
        Preview::render(state, Layout::default(), &QrEncoder::new())
            .unwrap()
            .rasterize()
    }

    #[test]
    fn module_spans_tile_the_symbol() {
        let modules = 29;
        let mut covered = 0;
        for i in 0..modules {
            let (start, end) = module_span(i, modules, 256);
            assert_eq!(start, covered);
            covered = end;
        }
        assert_eq!(covered, 256);
    }

    #[test]
    fn margin_is_white_and_finder_uses_color() {
        let color = QrColor::rgb(0x12, 0x34, 0x56);
        let img = render(&StudioState::new(color));

        assert_eq!(img.dimensions(), (320, 320));
        assert_eq!(*img.get_pixel(0, 0), QrColor::WHITE.to_rgba());
        assert_eq!(*img.get_pixel(31, 31), QrColor::WHITE.to_rgba());
        // Top-left module of the finder pattern is always dark.
        assert_eq!(*img.get_pixel(32, 32), color.to_rgba());
    }

    #[test]
    fn every_pixel_is_foreground_or_white_without_logo() {
        let color = QrColor::rgb(0, 0x80, 0);
        let img = render(&StudioState::new(color).with_text("pixels"));
        assert!(
            img.pixels()
                .all(|p| *p == color.to_rgba() || *p == QrColor::WHITE.to_rgba())
        );
    }

    #[test]
    fn logo_sits_on_white_patch() {
        let state = StudioState::new(QrColor::rgb(0, 0, 0))
            .with_logo(logo_png([0, 0, 255, 255], 10, 10));
        let img = render(&state);
        let (left, top) = Layout::default().logo_origin();

        // Padding ring inside the rounded corners is white.
        assert_eq!(*img.get_pixel(left + 32, top + 1), QrColor::WHITE.to_rgba());
        assert_eq!(*img.get_pixel(left + 1, top + 32), QrColor::WHITE.to_rgba());
        // Logo fills the padded box center.
        assert_eq!(*img.get_pixel(left + 32, top + 32), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn wide_logo_is_letterboxed() {
        let state = StudioState::new(QrColor::rgb(0, 0, 0))
            .with_logo(logo_png([255, 0, 0, 255], 40, 10));
        let img = render(&state);
        let (left, top) = Layout::default().logo_origin();

        // 56x14 after fitting, vertically centered in the 56 px box.
        assert_eq!(*img.get_pixel(left + 32, top + 32), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(left + 32, top + 10), QrColor::WHITE.to_rgba());
    }

    #[test]
    fn transparent_logo_blends_with_patch() {
        let state = StudioState::new(QrColor::rgb(0, 0, 0))
            .with_logo(logo_png([0, 0, 0, 0], 8, 8));
        let img = render(&state);
        let (left, top) = Layout::default().logo_origin();
        assert_eq!(*img.get_pixel(left + 32, top + 32), QrColor::WHITE.to_rgba());
    }

    #[test]
    fn rounded_corners_are_cut() {
        assert!(!inside_rounded_square(0, 0, 64, 8));
        assert!(!inside_rounded_square(63, 63, 64, 8));
        assert!(inside_rounded_square(8, 0, 64, 8));
        assert!(inside_rounded_square(32, 32, 64, 8));
        assert!(inside_rounded_square(0, 0, 64, 0));
    }
}
