//! Marker shapes and the map's color palette.

use std::str::FromStr;

use image::Rgba;

/// Marker glyphs, named after their matplotlib codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarkerShape {
    /// `o`
    #[default]
    Circle,
    /// `s`
    Square,
    /// `^`
    Triangle,
    /// `D`
    Diamond,
    /// `+`
    Plus,
    /// `x`
    Cross,
    /// `*`
    Star,
}

impl FromStr for MarkerShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "o" | "circle" => Ok(Self::Circle),
            "s" | "square" => Ok(Self::Square),
            "^" | "triangle" => Ok(Self::Triangle),
            "D" | "d" | "diamond" => Ok(Self::Diamond),
            "+" | "plus" => Ok(Self::Plus),
            "x" | "X" | "cross" => Ok(Self::Cross),
            "*" | "star" => Ok(Self::Star),
            other => Err(format!("unknown marker `{other}`")),
        }
    }
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Colors for the dark map theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub disk: Rgba<u8>,
    pub rim: Rgba<u8>,
    pub graticule: Rgba<u8>,
    pub special_latitude: Rgba<u8>,
    pub coastline: Rgba<u8>,
    pub city: Rgba<u8>,
    pub daylight: Rgba<u8>,
    pub sun: Rgba<u8>,
    pub moon: Rgba<u8>,
    pub legend_frame: Rgba<u8>,
    pub text: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: rgb(0, 0, 0),
            disk: rgb(8, 16, 32),
            rim: rgb(120, 120, 120),
            graticule: Rgba([211, 211, 211, 110]),
            special_latitude: rgb(0, 160, 0),
            coastline: rgb(200, 200, 200),
            city: rgb(255, 120, 80),
            daylight: Rgba([254, 196, 79, 77]),
            sun: rgb(255, 215, 0),
            moon: rgb(190, 190, 200),
            legend_frame: rgb(90, 90, 90),
            text: rgb(235, 235, 235),
        }
    }
}
