use palette::{named, Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::layout::SegmentColor;

/// Per-vector colors, cycled by index
const CLASSIC_VECTORS: [Srgb<u8>; 3] = [named::BLUE, named::ORANGE, named::PURPLE];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Spectrum,
    Pastel,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "spectrum" => Ok(Self::Spectrum),
            "pastel" => Ok(Self::Pastel),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

fn rgb8(c: Srgb<u8>) -> (u8, u8, u8) {
    (c.red, c.green, c.blue)
}

fn hsl(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let rgb: Srgb = Hsl::new(h, s, l).into_color();
    (
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

impl ColorScheme {
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Classic => "classic",
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Pastel => "pastel",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    /// RGB color for a segment color role
    pub fn segment_color(&self, color: SegmentColor) -> (u8, u8, u8) {
        match (self, color) {
            (ColorScheme::Classic, SegmentColor::Vector(i)) => rgb8(CLASSIC_VECTORS[i % 3]),
            (ColorScheme::Classic, SegmentColor::Resultant) => rgb8(named::RED),
            (ColorScheme::Classic, SegmentColor::Intermediate) => rgb8(named::GREEN),
            (ColorScheme::Classic, SegmentColor::Completion) => rgb8(named::GRAY),

            // Evenly spaced hues, resultants at the warm end
            (ColorScheme::Spectrum, SegmentColor::Vector(i)) => hsl(200.0 + (i % 3) as f32 * 60.0, 0.85, 0.55),
            (ColorScheme::Spectrum, SegmentColor::Resultant) => hsl(10.0, 0.9, 0.55),
            (ColorScheme::Spectrum, SegmentColor::Intermediate) => hsl(120.0, 0.7, 0.5),
            (ColorScheme::Spectrum, SegmentColor::Completion) => hsl(0.0, 0.0, 0.55),

            (ColorScheme::Pastel, SegmentColor::Vector(i)) => hsl(210.0 + (i % 3) as f32 * 90.0, 0.6, 0.75),
            (ColorScheme::Pastel, SegmentColor::Resultant) => hsl(350.0, 0.7, 0.75),
            (ColorScheme::Pastel, SegmentColor::Intermediate) => hsl(140.0, 0.5, 0.7),
            (ColorScheme::Pastel, SegmentColor::Completion) => hsl(0.0, 0.0, 0.65),

            (ColorScheme::Monochrome, SegmentColor::Vector(i)) => hsl(0.0, 0.0, 0.9 - (i % 3) as f32 * 0.15),
            (ColorScheme::Monochrome, SegmentColor::Resultant) => hsl(0.0, 0.0, 1.0),
            (ColorScheme::Monochrome, SegmentColor::Intermediate) => hsl(0.0, 0.0, 0.7),
            (ColorScheme::Monochrome, SegmentColor::Completion) => hsl(0.0, 0.0, 0.45),
        }
    }

    /// Color of the x=0 and y=0 axis lines
    pub fn axis_color(&self) -> (u8, u8, u8) {
        rgb8(named::WHITESMOKE)
    }

    /// Color of the tick grid
    pub fn grid_color(&self) -> (u8, u8, u8) {
        rgb8(named::DIMGRAY)
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Classic,
            ColorScheme::Spectrum,
            ColorScheme::Pastel,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}
