//! Resolved background colors and their perceived brightness.
//!
//! Render trees report computed colors as CSS text. Browsers normalize them to
//! `rgb(r, g, b)` / `rgba(r, g, b, a)`, but hand-written snapshots and other
//! runtimes also produce hex codes, the modern space-separated syntax and the
//! occasional keyword, so all of these are accepted:
//!
//! - `rgb(17, 24, 39)`, `rgba(0, 0, 0, 0.5)`, `rgb(17 24 39 / 50%)`
//! - `#111`, `#1118`, `#111827`, `#11182780`
//! - `transparent` and the basic named colors (`black`, `white`, `navy`, ...)
//!
//! Tokenizing is done by `cssparser`, so comments, escapes and whitespace
//! behave exactly as they do in a stylesheet.
//!
//! # Example
//!
//! ```rust
//! use navtone::Rgba;
//!
//! let slate = Rgba::parse("rgb(15, 23, 42)").unwrap();
//! assert!(slate.brightness() < 150.0);
//!
//! let clear = Rgba::parse("rgba(0,0,0,0)").unwrap();
//! assert!(clear.is_transparent());
//! ```

use cssparser::{ParseError, Parser, ParserInput, Token};

/// An sRGB color with alpha, as resolved from a computed style.
///
/// Channels stay unrounded on the `0.0..=255.0` scale: engines resolve
/// `color-mix()` and opacity blends to fractional components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl Rgba {
    /// Creates an opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r),
            g: f32::from(g),
            b: f32::from(b),
            alpha: 1.0,
        }
    }

    /// The fully transparent color (`transparent`, `rgba(0,0,0,0)`).
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        alpha: 0.0,
    };

    /// Parses a CSS color value.
    pub fn parse(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("empty color value".to_string());
        }

        let mut input = ParserInput::new(trimmed);
        let mut parser = Parser::new(&mut input);

        let color = parse_color(&mut parser).map_err(|_| format!("Invalid color: {}", trimmed))?;
        parser
            .expect_exhausted()
            .map_err(|_| format!("Unexpected trailing input in color: {}", trimmed))?;
        Ok(color)
    }

    /// Perceived brightness on a `0.0..=255.0` scale:
    /// `0.299 R + 0.587 G + 0.114 B`.
    ///
    /// Weighted in thousandths, so whole channels sum exactly and a neutral
    /// gray `rgb(150, 150, 150)` comes out at exactly `150.0`.
    pub fn brightness(&self) -> f64 {
        let weighted =
            299.0 * f64::from(self.r) + 587.0 * f64::from(self.g) + 114.0 * f64::from(self.b);
        weighted / 1000.0
    }

    /// True when the color paints nothing.
    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

fn parse_color<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Rgba, ParseError<'i, ()>> {
    let token = input.next()?.clone();

    match token {
        Token::Ident(name) => {
            named_color(name.as_ref()).ok_or_else(|| input.new_custom_error::<(), ()>(()))
        }
        Token::Hash(hex) | Token::IDHash(hex) => {
            parse_hex(hex.as_ref()).ok_or_else(|| input.new_custom_error::<(), ()>(()))
        }
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            input.parse_nested_block(|args| parse_rgb_args(args))
        }
        _ => Err(input.new_custom_error::<(), ()>(())),
    }
}

/// Parses the arguments of `rgb()` / `rgba()`.
///
/// Legacy syntax separates every component with commas; modern syntax uses
/// whitespace and an optional `/ alpha`. The separator after the first channel
/// decides which one applies.
fn parse_rgb_args<'i, 't>(input: &mut Parser<'i, 't>) -> Result<Rgba, ParseError<'i, ()>> {
    let r = parse_channel(input)?;
    let legacy = input.try_parse(|p| p.expect_comma()).is_ok();
    let g = parse_channel(input)?;
    if legacy {
        input.expect_comma()?;
    }
    let b = parse_channel(input)?;

    let mut alpha = 1.0;
    if !input.is_exhausted() {
        if legacy {
            input.expect_comma()?;
        } else {
            input.expect_delim('/')?;
        }
        alpha = parse_alpha(input)?;
    }
    input.expect_exhausted()?;

    Ok(Rgba { r, g, b, alpha })
}

fn parse_channel<'i, 't>(input: &mut Parser<'i, 't>) -> Result<f32, ParseError<'i, ()>> {
    let value = match input.next()? {
        Token::Number { value, .. } => Some(*value),
        Token::Percentage { unit_value, .. } => Some(*unit_value * 255.0),
        _ => None,
    };
    value
        .map(|v| v.clamp(0.0, 255.0))
        .ok_or_else(|| input.new_custom_error::<(), ()>(()))
}

fn parse_alpha<'i, 't>(input: &mut Parser<'i, 't>) -> Result<f32, ParseError<'i, ()>> {
    let value = match input.next()? {
        Token::Number { value, .. } => Some(*value),
        Token::Percentage { unit_value, .. } => Some(*unit_value),
        _ => None,
    };
    value
        .map(|v| v.clamp(0.0, 1.0))
        .ok_or_else(|| input.new_custom_error::<(), ()>(()))
}

/// Parses a hex color code (without the `#`): 3, 4, 6 or 8 digits.
fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::rgb(digit(0)?, digit(1)?, digit(2)?)),
        4 => Some(Rgba {
            r: f32::from(digit(0)?),
            g: f32::from(digit(1)?),
            b: f32::from(digit(2)?),
            alpha: f32::from(digit(3)?) / 255.0,
        }),
        6 => Some(Rgba::rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Rgba {
            r: f32::from(pair(0)?),
            g: f32::from(pair(2)?),
            b: f32::from(pair(4)?),
            alpha: f32::from(pair(6)?) / 255.0,
        }),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => Rgba::TRANSPARENT,
        "black" => Rgba::rgb(0, 0, 0),
        "white" => Rgba::rgb(255, 255, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "silver" => Rgba::rgb(192, 192, 192),
        "red" => Rgba::rgb(255, 0, 0),
        "maroon" => Rgba::rgb(128, 0, 0),
        "green" => Rgba::rgb(0, 128, 0),
        "lime" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "navy" => Rgba::rgb(0, 0, 128),
        "yellow" => Rgba::rgb(255, 255, 0),
        "olive" => Rgba::rgb(128, 128, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "teal" => Rgba::rgb(0, 128, 128),
        "aqua" | "cyan" => Rgba::rgb(0, 255, 255),
        "fuchsia" | "magenta" => Rgba::rgb(255, 0, 255),
        "orange" => Rgba::rgb(255, 165, 0),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Functional notation
    // =========================================================================

    #[test]
    fn test_parse_rgb_legacy() {
        assert_eq!(
            Rgba::parse("rgb(17, 24, 39)").unwrap(),
            Rgba::rgb(17, 24, 39)
        );
        assert_eq!(Rgba::parse("rgb(0,0,0)").unwrap(), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn test_parse_rgba_legacy() {
        let c = Rgba::parse("rgba(255, 255, 255, 0.5)").unwrap();
        assert_eq!((c.r, c.g, c.b), (255.0, 255.0, 255.0));
        assert!((c.alpha - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_rgb_modern() {
        let c = Rgba::parse("rgb(17 24 39 / 50%)").unwrap();
        assert_eq!((c.r, c.g, c.b), (17.0, 24.0, 39.0));
        assert!((c.alpha - 0.5).abs() < f32::EPSILON);

        assert_eq!(Rgba::parse("rgb(1 2 3)").unwrap(), Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_parse_rgb_percentages() {
        let c = Rgba::parse("rgb(100%, 0%, 50%)").unwrap();
        assert_eq!((c.r, c.g, c.b), (255.0, 0.0, 127.5));
    }

    #[test]
    fn test_parse_rgb_clamps_out_of_range() {
        assert_eq!(
            Rgba::parse("rgb(300, -5, 12)").unwrap(),
            Rgba::rgb(255, 0, 12)
        );
    }

    #[test]
    fn test_parse_rgb_case_insensitive_function() {
        assert_eq!(Rgba::parse("RGB(1, 2, 3)").unwrap(), Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn test_parse_rgb_rejects_mixed_separators() {
        assert!(Rgba::parse("rgb(1, 2 3)").is_err());
        assert!(Rgba::parse("rgb(1 2, 3)").is_err());
        assert!(Rgba::parse("rgb(1, 2)").is_err());
        assert!(Rgba::parse("rgb(1, 2, 3, 4, 5)").is_err());
    }

    // =========================================================================
    // Hex and keywords
    // =========================================================================

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(Rgba::parse("#fff").unwrap(), Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::parse("#111827").unwrap(), Rgba::rgb(17, 24, 39));
        assert_eq!(Rgba::parse("#FF6B35").unwrap(), Rgba::rgb(255, 107, 53));

        let short_alpha = Rgba::parse("#0000").unwrap();
        assert!(short_alpha.is_transparent());

        let long_alpha = Rgba::parse("#00000080").unwrap();
        assert!(!long_alpha.is_transparent());
        assert!(long_alpha.alpha < 0.6);
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(Rgba::parse("#ff").is_err());
        assert!(Rgba::parse("#fffff").is_err());
        assert!(Rgba::parse("#gggggg").is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert!(Rgba::parse("transparent").unwrap().is_transparent());
        assert_eq!(Rgba::parse("Navy").unwrap(), Rgba::rgb(0, 0, 128));
        assert!(Rgba::parse("rebeccapurple-ish").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse("").is_err());
        assert!(Rgba::parse("   ").is_err());
        assert!(Rgba::parse("hsl(0, 0%, 0%)").is_err());
        assert!(Rgba::parse("rgb(0, 0, 0) extra").is_err());
        assert!(Rgba::parse("url(x.png)").is_err());
    }

    // =========================================================================
    // Brightness
    // =========================================================================

    #[test]
    fn test_brightness_extremes() {
        assert_eq!(Rgba::rgb(0, 0, 0).brightness(), 0.0);
        assert_eq!(Rgba::rgb(255, 255, 255).brightness(), 255.0);
    }

    #[test]
    fn test_brightness_neutral_gray_is_exact() {
        assert_eq!(Rgba::rgb(150, 150, 150).brightness(), 150.0);
        assert_eq!(Rgba::rgb(149, 149, 149).brightness(), 149.0);
    }

    #[test]
    fn test_fractional_channels_are_not_rounded() {
        let c = Rgba::parse("rgb(149.5, 149.5, 149.5)").unwrap();
        assert_eq!((c.r, c.g, c.b), (149.5, 149.5, 149.5));
        assert_eq!(c.brightness(), 149.5);

        let c = Rgba::parse("rgb(149.999 149.999 149.999)").unwrap();
        assert!(c.brightness() < 150.0);
    }

    #[test]
    fn test_brightness_weights() {
        assert_eq!(Rgba::rgb(255, 0, 0).brightness(), 76.245);
        assert_eq!(Rgba::rgb(0, 255, 0).brightness(), 149.685);
        assert_eq!(Rgba::rgb(0, 0, 255).brightness(), 29.07);
    }
}
