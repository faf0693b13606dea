// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

use crate::error::{ArcError, Result};

/// RGBA color with unit-range components, used for strokes and gradient stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Opaque color from a `0xRRGGBB` literal. Bits above the low 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_rgb8(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Parses `#rrggbb`, `rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        let invalid = || ArcError::InvalidHexColor(text.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::from_hex(value)),
            8 => Ok(Self::from_hex(value >> 8).with_alpha((value & 0xff) as f64 / 255.0)),
            _ => Err(invalid()),
        }
    }

    /// Same RGB, replaced alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise linear blend, `t = 0` yields `self`.
    pub fn mix(self, other: Rgba, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

/// Two-stop linear gradient, offsets 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Rgba,
    pub end: Rgba,
}

impl LinearGradient {
    pub const fn new(start: Rgba, end: Rgba) -> Self {
        Self { start, end }
    }

    pub fn color_at(&self, t: f64) -> Rgba {
        self.start.mix(self.end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_splits_channels() {
        let color = Rgba::from_hex(0xe8e8e8);
        assert_eq!(color.to_rgba8(), [0xe8, 0xe8, 0xe8, 0xff]);

        // Digits above the low 24 bits are masked off.
        assert_eq!(Rgba::from_hex(0xebe1c94), Rgba::from_hex(0xbe1c94));
    }

    #[test]
    fn test_parse_hex_accepts_prefixed_and_alpha_forms() {
        assert_eq!(
            Rgba::parse_hex("#fa6e8c").unwrap().to_rgba8(),
            [0xfa, 0x6e, 0x8c, 0xff]
        );
        assert_eq!(
            Rgba::parse_hex("fa6e8c").unwrap(),
            Rgba::parse_hex("#fa6e8c").unwrap()
        );
        assert_eq!(
            Rgba::parse_hex("#be1c9480").unwrap().to_rgba8(),
            [0xbe, 0x1c, 0x94, 0x80]
        );
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(
            Rgba::parse_hex("#12345"),
            Err(ArcError::InvalidHexColor("#12345".to_string()))
        );
        assert!(Rgba::parse_hex("#gggggg").is_err());
        assert!(Rgba::parse_hex("+12345").is_err());
        assert!(Rgba::parse_hex("").is_err());
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let base = Rgba::from_hex(0xfa6e8c);
        let faded = base.with_alpha(0.25);
        assert_eq!((faded.r, faded.g, faded.b), (base.r, base.g, base.b));
        assert_eq!(faded.a, 0.25);
    }

    #[test]
    fn test_gradient_endpoints() {
        let gradient = LinearGradient::new(Rgba::rgb(0.0, 0.0, 0.0), Rgba::rgb(1.0, 1.0, 1.0));
        assert_eq!(gradient.color_at(0.0), gradient.start);
        assert_eq!(gradient.color_at(1.0), gradient.end);
        assert_eq!(gradient.color_at(0.5).r, 0.5);
        assert_eq!(gradient.color_at(7.0), gradient.end);
    }
}
