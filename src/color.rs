//! Colors, palettes, and the two point-to-color rules.  Escape-time
//! pictures sweep the hue wheel with the iteration count; Newton
//! pictures look their cluster's color up in a palette.  Anything the
//! kernels flagged as broken, and any root the palette ran out of
//! colors for, renders as black.

use errors::FractalError;
use roots::PointClass;

/// An RGB triple, the final output unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// The reserved color for non-convergent points and palette
    /// filler.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse a `#RRGGBB` hex spec (the leading `#` is optional).
    pub fn from_hex(spec: &str) -> Result<Rgb, FractalError> {
        let bad = || FractalError::BadColorSpec {
            spec: spec.to_string(),
        };
        let digits = spec.strip_prefix('#').unwrap_or(spec);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        Ok(Rgb {
            r: u8::from_str_radix(&digits[0..2], 16).map_err(|_| bad())?,
            g: u8::from_str_radix(&digits[2..4], 16).map_err(|_| bad())?,
            b: u8::from_str_radix(&digits[4..6], 16).map_err(|_| bad())?,
        })
    }
}

/// An ordered sequence of display colors.  Grows by appending black
/// filler when a render discovers more roots than it has entries;
/// never shrinks, never reorders.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// A palette over the given colors, in order.
    pub fn new(colors: Vec<Rgb>) -> Palette {
        Palette { colors }
    }

    /// Parse a list of hex specs into a palette.  The first
    /// unparseable entry aborts the whole parse.
    pub fn parse(specs: &[&str]) -> Result<Palette, FractalError> {
        let mut colors = Vec::with_capacity(specs.len());
        for spec in specs {
            colors.push(Rgb::from_hex(spec)?);
        }
        Ok(Palette::new(colors))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette holds no colors at all.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color in a slot.  Slots are handed out by the classifier,
    /// which guarantees they exist.
    pub fn color(&self, slot: usize) -> Rgb {
        self.colors[slot]
    }

    /// Append `n` black filler entries.
    pub fn pad_with_black(&mut self, n: usize) {
        for _ in 0..n {
            self.colors.push(Rgb::BLACK);
        }
    }
}

/// Convert an HSV color (hue in degrees, saturation and value in
/// [0, 1]) to RGB.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let c = v * s;
    let sector = (h % 360.0) / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Rgb {
        r: ((r + m) * 255.0).round() as u8,
        g: ((g + m) * 255.0).round() as u8,
        b: ((b + m) * 255.0).round() as u8,
    }
}

/// Color rule for escape-time results: hue proportional to the
/// fraction of the budget spent before escape, at full saturation and
/// value, so the count sweeps the hue wheel monotonically.  Points
/// that never escaped get value zero, i.e. the interior of the set is
/// black.
pub fn escape_color(n: u32, max_iter: u32) -> Rgb {
    if max_iter == 0 || n >= max_iter {
        return Rgb::BLACK;
    }
    hsv_to_rgb(360.0 * f64::from(n) / f64::from(max_iter), 1.0, 1.0)
}

/// Color rule for classified Newton results: a plain palette lookup,
/// with the reserved class painted black.
pub fn root_color(class: PointClass, palette: &Palette) -> Rgb {
    match class {
        PointClass::Root(slot) => palette.color(slot),
        PointClass::Reserved => Rgb::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_specs_parse_with_and_without_the_hash() {
        assert_eq!(
            Rgb::from_hex("#023E8A").unwrap(),
            Rgb {
                r: 0x02,
                g: 0x3E,
                b: 0x8A
            }
        );
        assert_eq!(
            Rgb::from_hex("ff0080").unwrap(),
            Rgb {
                r: 255,
                g: 0,
                b: 128
            }
        );
    }

    #[test]
    fn bad_hex_specs_are_refused() {
        for spec in &["", "#12345", "#1234567", "#12345g", "red"] {
            assert!(Rgb::from_hex(spec).is_err());
        }
    }

    #[test]
    fn palette_parse_aborts_on_the_first_bad_entry() {
        assert!(Palette::parse(&["#023E8A", "nope"]).is_err());
        let palette = Palette::parse(&["#023E8A", "#0077B6"]).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn hsv_hits_the_primary_corners() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(
            hsv_to_rgb(0.0, 0.0, 1.0),
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
    }

    #[test]
    fn the_interior_of_the_set_is_black() {
        assert_eq!(escape_color(100, 100), Rgb::BLACK);
        assert_ne!(escape_color(99, 100), Rgb::BLACK);
    }

    #[test]
    fn escape_hue_is_monotonic_in_the_count() {
        // Every escaping count within the first hue sector should
        // shift red toward yellow as the count grows.
        let slow = escape_color(1, 100);
        let fast = escape_color(10, 100);
        assert!(fast.g > slow.g);
    }

    #[test]
    fn reserved_points_are_black_regardless_of_palette() {
        let palette = Palette::new(vec![Rgb {
            r: 255,
            g: 255,
            b: 255,
        }]);
        assert_eq!(root_color(PointClass::Reserved, &palette), Rgb::BLACK);
        assert_eq!(
            root_color(PointClass::Root(0), &palette),
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
    }
}
