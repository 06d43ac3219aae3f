//! Pixel to viewport conversion
//!
//! Rewrites every bare pixel length in a value and copies everything else
//! through verbatim.

use crate::config::Config;
use crate::scanner::{Scanner, SegmentKind};

/// Cheap pre-check applied before scanning declaration values and at-rule
/// params. Case-sensitive, so an all-uppercase `PX` value is left alone by
/// the stylesheet walker even though the scanner itself would match it.
pub fn contains_pixels(text: &str) -> bool {
    text.contains("px")
}

/// Convert every pixel length in `text` to the configured viewport unit.
///
/// Quoted strings and `url(...)` spans are copied unchanged, as are lengths
/// at or below `min_pixel_value`. Text without any match comes back as is.
pub fn convert_value(text: &str, config: &Config) -> String {
    let mut out = String::with_capacity(text.len());

    for segment in Scanner::new(text) {
        match segment.kind {
            SegmentKind::Pixel(pixels) if pixels > config.min_pixel_value() => {
                let converted = to_fixed(pixels / config.viewport_width() * 100.0, config.unit_precision());
                if !converted.is_finite() {
                    log::debug!("Leaving {} alone, out of range", segment.text);
                    out.push_str(segment.text);
                    continue;
                }
                log::trace!("{} -> {}{}", segment.text, converted, config.viewport_unit());
                out.push_str(&format!("{}{}", converted, config.viewport_unit()));
            }
            _ => out.push_str(segment.text),
        }
    }

    out
}

/// Convert the params of an at-rule (e.g. a media query).
pub fn convert_at_rule_params(params: &str, config: &Config) -> String {
    convert_value(params, config)
}

/// Round to `precision` fractional digits.
///
/// Truncates at one extra digit first and then rounds that digit half away
/// from zero. Output must stay identical to existing converted stylesheets,
/// so this is not a plain `(n * 10^p).round() / 10^p`.
///
/// Numbers too large to scale at the requested precision come back as is.
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let Some(exponent) = i32::try_from(precision).ok().and_then(|p| p.checked_add(1)) else {
        return number;
    };
    let multiplier = 10f64.powi(exponent);
    let whole = (number * multiplier).floor();
    if !whole.is_finite() {
        return number;
    }
    (whole / 10.0).round() * 10.0 / multiplier
}
