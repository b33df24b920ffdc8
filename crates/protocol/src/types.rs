use serde::{Deserialize, Serialize};

/// An 8-bit sRGB color parsed from a token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` or
    /// `rgba(r, g, b, a)` (alpha in 0–1).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let lower = value.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<f64>().ok().filter(|v| (0.0..=255.0).contains(v));
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(
                channel(r)?.round() as u8,
                channel(g)?.round() as u8,
                channel(b)?.round() as u8,
            )),
            [r, g, b, a] => {
                let alpha = a.parse::<f64>().ok().filter(|v| (0.0..=1.0).contains(v))?;
                Some(Self::rgba(
                    channel(r)?.round() as u8,
                    channel(g)?.round() as u8,
                    channel(b)?.round() as u8,
                    (alpha * 255.0).round() as u8,
                ))
            }
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// `#RRGGBB`, uppercase, alpha dropped.
    pub fn hex6(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `AARRGGBB`, uppercase, as used by Android color ints.
    pub fn argb(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// Channels as 0–1 floats, rounded to three decimals.
    pub fn unit_components(&self) -> [f64; 4] {
        let unit = |c: u8| (f64::from(c) / 255.0 * 1000.0).round() / 1000.0;
        [unit(self.r), unit(self.g), unit(self.b), unit(self.a)]
    }
}

/// Root font size used to convert `rem`/`em` lengths.
pub const ROOT_FONT_SIZE: f64 = 16.0;

/// Non-negative length magnitude parsed from a token value, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension(pub f64);

impl Dimension {
    /// Accepts a bare number or one suffixed with `px`, `dp`, `pt`, `sp`,
    /// `rem` or `em`. Negative and non-finite values are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (number, scale) = [
            ("rem", ROOT_FONT_SIZE),
            ("em", ROOT_FONT_SIZE),
            ("px", 1.0),
            ("dp", 1.0),
            ("pt", 1.0),
            ("sp", 1.0),
        ]
        .iter()
        .find_map(|(unit, scale)| value.strip_suffix(unit).map(|n| (n, *scale)))
        .unwrap_or((value, 1.0));
        let magnitude = number.trim().parse::<f64>().ok()? * scale;
        (magnitude.is_finite() && magnitude >= 0.0).then_some(Self(magnitude))
    }

    /// Shortest decimal rendering: `16`, `1.5`, `0.25`.
    pub fn format(&self) -> String {
        format_number(self.0)
    }
}

/// Render a float without a trailing `.0` and with at most three decimals.
pub fn format_number(value: f64) -> String {
    let rounded = if value.fract() == 0.0 {
        value
    } else {
        (value * 1000.0).round() / 1000.0
    };
    if rounded == 0.0 {
        // Also covers `-0`.
        "0".to_owned()
    } else if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Numeric font weight from a number or a Token Studio weight name.
pub fn parse_font_weight(value: &str) -> Option<u16> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u16>() {
        return (1..=1000).contains(&n).then_some(n);
    }
    let normalized: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_ascii_lowercase();
    let weight = match normalized.as_str() {
        "thin" | "hairline" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "regular" | "normal" | "book" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => return None,
    };
    Some(weight)
}
