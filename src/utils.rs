/// Greatest common divisor by Euclid's algorithm.
///
/// `gcd(x, 0)` is `x`; a missing operand gives `None`.
pub fn gcd(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    fn euclid(a: u64, b: u64) -> u64 {
        if b == 0 { a } else { euclid(b, a % b) }
    }

    Some(euclid(a?, b?))
}

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Corners of a box rotated clockwise by `angle` degrees about its center.
pub fn rotated_corners(x: f64, y: f64, width: f64, height: f64, angle: f64) -> [Point; 4] {
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    let (sin, cos) = angle.to_radians().sin_cos();

    let rotate = |px: f64, py: f64| {
        let dx = px - cx;
        let dy = py - cy;
        Point {
            x: cx + dx * cos - dy * sin,
            y: cy + dx * sin + dy * cos,
        }
    };

    [
        rotate(x, y),
        rotate(x + width, y),
        rotate(x + width, y + height),
        rotate(x, y + height),
    ]
}
