//! WCAG contrast computations for text legibility checks.

use crate::linter::constants::{LARGE_TEXT_FONT_SIZE, WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT};
use crate::linter::rules::RuleError;
use crate::story::Rgba;

/// Parse a CSS color in `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()` or `rgba()`
/// notation.
pub fn parse_css_color(value: &str) -> Result<Rgba, RuleError> {
    let invalid = || RuleError::InvalidColor(value.to_string());
    let value_trimmed = value.trim();

    if let Some(hex) = value_trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let lower = value_trimmed.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(parts.len() == 3 || parts.len() == 4) {
        return Err(invalid());
    }

    let channel = |s: &str| s.parse::<u8>().map_err(|_| invalid());
    let a = match parts.get(3) {
        Some(alpha) => alpha.parse::<f64>().map_err(|_| invalid())?,
        None => 1.0,
    };

    Ok(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    let short = |c: &str| byte(&c.repeat(2));

    match hex.len() {
        3 => Some(Rgba::rgb(short(&hex[0..1])?, short(&hex[1..2])?, short(&hex[2..3])?)),
        6 | 8 => {
            let a = if hex.len() == 8 {
                f64::from(byte(&hex[6..8])?) / 255.0
            } else {
                1.0
            };
            Some(Rgba {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
                a,
            })
        }
        _ => None,
    }
}

fn linear_channel(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an sRGB color. Alpha is ignored.
pub fn relative_luminance(color: Rgba) -> f64 {
    0.2126 * linear_channel(color.r)
        + 0.7152 * linear_channel(color.g)
        + 0.0722 * linear_channel(color.b)
}

/// Contrast ratio between two luminances, lighter over darker.
pub fn contrast_ratio(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `ratio` passes WCAG AA for text of the given size.
///
/// Unknown sizes are held to the normal-text threshold.
pub fn meets_wcag_aa(ratio: f64, font_size: Option<f64>) -> bool {
    let threshold = match font_size {
        Some(size) if size >= LARGE_TEXT_FONT_SIZE => WCAG_AA_LARGE_TEXT,
        _ => WCAG_AA_NORMAL_TEXT,
    };
    ratio >= threshold
}
