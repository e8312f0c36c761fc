//! Fixed stroke color palette

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::AnnotationError;

/// A named stroke color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaletteColor {
    Red,
    Blue,
    Green,
    Yellow,
    #[default]
    Black,
    White,
}

impl PaletteColor {
    /// Palette entries in menu order
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Red,
        PaletteColor::Blue,
        PaletteColor::Green,
        PaletteColor::Yellow,
        PaletteColor::Black,
        PaletteColor::White,
    ];

    /// Display name, as shown in the color menu
    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Red => "Red",
            PaletteColor::Blue => "Blue",
            PaletteColor::Green => "Green",
            PaletteColor::Yellow => "Yellow",
            PaletteColor::Black => "Black",
            PaletteColor::White => "White",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Red => "#dd3754",
            PaletteColor::Blue => "#3156dd",
            PaletteColor::Green => "#23ca38",
            PaletteColor::Yellow => "#e3e32d",
            PaletteColor::Black => "#000000",
            PaletteColor::White => "#ffffff",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            PaletteColor::Red => [0xdd, 0x37, 0x54],
            PaletteColor::Blue => [0x31, 0x56, 0xdd],
            PaletteColor::Green => [0x23, 0xca, 0x38],
            PaletteColor::Yellow => [0xe3, 0xe3, 0x2d],
            PaletteColor::Black => [0x00, 0x00, 0x00],
            PaletteColor::White => [0xff, 0xff, 0xff],
        }
    }

    /// Opaque pixel value for this color
    pub fn rgba(self) -> Rgba<u8> {
        let [r, g, b] = self.rgb();
        Rgba([r, g, b, 255])
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteColor {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AnnotationError::UnknownColor(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_hex(hex: &str) -> [u8; 3] {
        let digits = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap();
        [channel(0), channel(2), channel(4)]
    }

    #[test]
    fn test_rgb_matches_hex() {
        for color in PaletteColor::ALL {
            assert_eq!(color.rgb(), parse_hex(color.hex()), "{color}");
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(PaletteColor::from_name("Red"), Some(PaletteColor::Red));
        assert_eq!(PaletteColor::from_name("yellow"), Some(PaletteColor::Yellow));
        assert_eq!(PaletteColor::from_name(" WHITE "), Some(PaletteColor::White));
        assert_eq!(PaletteColor::from_name("Magenta"), None);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        assert!(matches!(
            "Purple".parse::<PaletteColor>(),
            Err(AnnotationError::UnknownColor(name)) if name == "Purple"
        ));
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(PaletteColor::default(), PaletteColor::Black);
        assert_eq!(PaletteColor::Black.rgba(), Rgba([0, 0, 0, 255]));
    }
}
