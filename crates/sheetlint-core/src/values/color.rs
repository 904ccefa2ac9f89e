//! Color payloads and notation parsing.

use serde::{Deserialize, Serialize};

use super::keywords;
use super::parse_number;

/// HSL representation of a color, kept verbatim from `hsl()`/`hsla()` source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees, as written.
    pub hue: f64,
    /// Saturation in `[0, 1]`.
    pub saturation: f64,
    /// Lightness in `[0, 1]`.
    pub lightness: f64,
}

/// A color normalized to 8-bit-range sRGB channels.
///
/// Channels are floats so that percentage notation keeps its precision:
/// `rgb(5%, 5%, 5%)` has channels of `12.75`, not `12` or `13`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel in `[0, 255]`.
    pub red: f64,
    /// Green channel in `[0, 255]`.
    pub green: f64,
    /// Blue channel in `[0, 255]`.
    pub blue: f64,
    /// Alpha in `[0, 1]`, when the notation carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// HSL components, when the source was `hsl()`/`hsla()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl: Option<Hsl>,
}

impl Color {
    /// Creates an opaque color from channels in `[0, 255]`.
    #[must_use]
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
            hsl: None,
        }
    }

    /// Sets the alpha component.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Creates a color from HSL components, filling the RGB channels too.
    #[must_use]
    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let [red, green, blue] = hsl_to_rgb(hue, saturation, lightness);
        Self {
            red,
            green,
            blue,
            alpha: None,
            hsl: Some(Hsl {
                hue,
                saturation,
                lightness,
            }),
        }
    }

    /// Returns true unless the color has an alpha below 1.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.alpha.map_or(true, |alpha| alpha >= 1.0)
    }

    /// Parses the digits of `#rgb` or `#rrggbb` (without the `#`).
    pub(crate) fn from_hex(digits: &str) -> Option<Self> {
        let nibbles: Vec<u32> = digits
            .chars()
            .map(|c| c.to_digit(16))
            .collect::<Option<_>>()?;
        let channels: Vec<f64> = match nibbles.len() {
            3 => nibbles.iter().map(|n| f64::from(n * 17)).collect(),
            6 => nibbles
                .chunks(2)
                .map(|pair| f64::from(pair[0] * 16 + pair[1]))
                .collect(),
            _ => return None,
        };
        Some(Self::rgb(channels[0], channels[1], channels[2]))
    }

    /// Resolves a color keyword.
    pub(crate) fn from_keyword(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::rgb(0.0, 0.0, 0.0).with_alpha(0.0));
        }
        keywords::lookup(name)
            .map(|[r, g, b]| Self::rgb(f64::from(r), f64::from(g), f64::from(b)))
    }

    /// Parses the arguments of `rgb()`/`rgba()`.
    pub(crate) fn from_rgb_args(args: &[&str]) -> Option<Self> {
        let (channels, alpha) = split_alpha(args)?;
        let red = rgb_channel(channels[0])?;
        let green = rgb_channel(channels[1])?;
        let blue = rgb_channel(channels[2])?;
        let color = Self::rgb(red, green, blue);
        match alpha {
            Some(text) => Some(color.with_alpha(alpha_channel(text)?)),
            None => Some(color),
        }
    }

    /// Parses the arguments of `hsl()`/`hsla()`.
    pub(crate) fn from_hsl_args(args: &[&str]) -> Option<Self> {
        let (channels, alpha) = split_alpha(args)?;
        let hue = hue_angle(channels[0])?;
        let saturation = unit_fraction(channels[1])?;
        let lightness = unit_fraction(channels[2])?;
        let color = Self::hsl(hue, saturation, lightness);
        match alpha {
            Some(text) => Some(color.with_alpha(alpha_channel(text)?)),
            None => Some(color),
        }
    }
}

fn split_alpha<'a>(args: &'a [&'a str]) -> Option<(&'a [&'a str], Option<&'a str>)> {
    match args.len() {
        3 => Some((args, None)),
        4 => Some((&args[..3], Some(args[3]))),
        _ => None,
    }
}

fn percentage(text: &str) -> Option<f64> {
    text.strip_suffix('%').and_then(parse_number)
}

fn rgb_channel(text: &str) -> Option<f64> {
    let value = match percentage(text) {
        Some(pct) => pct * 255.0 / 100.0,
        None => parse_number(text)?,
    };
    Some(value.clamp(0.0, 255.0))
}

fn alpha_channel(text: &str) -> Option<f64> {
    let value = match percentage(text) {
        Some(pct) => pct / 100.0,
        None => parse_number(text)?,
    };
    Some(value.clamp(0.0, 1.0))
}

fn hue_angle(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    parse_number(lower.strip_suffix("deg").unwrap_or(&lower))
}

/// Saturation and lightness must be written as percentages.
fn unit_fraction(text: &str) -> Option<f64> {
    Some((percentage(text)? / 100.0).clamp(0.0, 1.0))
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    if saturation == 0.0 {
        let gray = lightness * 255.0;
        return [gray, gray, gray];
    }
    let h = hue.rem_euclid(360.0) / 360.0;
    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    ]
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
