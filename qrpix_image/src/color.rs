use std::str::FromStr;

use image::Rgba;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Get the `#rrggbb` notation of the color, ignoring alpha.
    /// # Example
    /// ```
    /// use qrpix_image::Color;
    /// assert_eq!(Color::rgb(255, 165, 0).to_hex(), "#ffa500");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Get the alpha channel as an opacity in the range `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / u8::MAX as f32
    }
}

impl From<Color> for Rgba<u8> {
    fn from(value: Color) -> Self {
        Rgba([value.r, value.g, value.b, value.a])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rgb, #rrggbb, #rrggbbaa, black, white or transparent")]
pub struct ColorParseError(String);

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse a color in hexadecimal notation (the leading `#` is optional) or by name.
    /// # Example
    /// ```
    /// use qrpix_image::Color;
    /// assert_eq!("#f80".parse(), Ok(Color::rgb(0xff, 0x88, 0x00)));
    /// assert_eq!("00000080".parse(), Ok(Color::rgba(0, 0, 0, 0x80)));
    /// assert_eq!("White".parse(), Ok(Color::WHITE));
    /// assert!("#12345".parse::<Color>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digits: Vec<u8> = hex
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        let channels: Vec<u8> = match digits.len() {
            3 => digits.iter().map(|d| d * 17).collect(),
            6 | 8 => digits.chunks_exact(2).map(|pair| pair[0] << 4 | pair[1]).collect(),
            _ => return Err(invalid()),
        };
        let alpha = channels.get(3).copied().unwrap_or(u8::MAX);
        Ok(Self::rgba(channels[0], channels[1], channels[2], alpha))
    }
}
