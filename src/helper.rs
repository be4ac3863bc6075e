//! Rendering helpers for downstream consumers.
//!
//! These read a symbol only through [`QrCode::size`] and [`QrCode::get_module`].

use crate::qrcode::QrCode;

use image::{ImageBuffer, Luma};

/// Returns a string of SVG code for an image depicting the given QR Code,
/// with the given number of border modules.
///
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Panics
///
/// Panics if `border` is negative or too large.
pub fn to_svg_string(qr: &QrCode, border: i32) -> String {
    assert!(border >= 0, "Border must be non-negative");
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = border.checked_mul(2).and_then(|b| qr.size().checked_add(b));
    let Some(dimension) = dimension else {
        panic!("SVG size overflows i32");
    };
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += "\" fill=\"#000000\"/>\n";
    result += "</svg>\n";
    result
}

/// Renders the QR Code as a grayscale image, `scale` pixels per module, with
/// `border` light modules on each side.
///
/// # Panics
///
/// Panics if `border` is negative, `scale` is zero, or the image side
/// does not fit in a `u32`.
pub fn to_image_buffer(qr: &QrCode, border: i32, scale: u32) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    assert!(border >= 0, "Border must be non-negative");
    assert!(scale > 0, "Scale must be positive");
    let size = border
        .checked_mul(2)
        .and_then(|b| qr.size().checked_add(b))
        .and_then(|modules| u32::try_from(modules).ok())
        .and_then(|modules| modules.checked_mul(scale));
    let Some(size) = size else {
        panic!("Image size overflows u32");
    };
    ImageBuffer::from_fn(size, size, |x, y| {
        let qr_x = (x / scale) as i32 - border;
        let qr_y = (y / scale) as i32 - border;
        if qr.get_module(qr_x, qr_y) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

/// Renders the QR Code as text, two characters per module so the symbol
/// keeps its aspect ratio in a terminal.
pub fn to_terminal_string(qr: &QrCode, border: i32) -> String {
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c: char = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}
