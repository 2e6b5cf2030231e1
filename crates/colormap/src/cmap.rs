//! Colormaps built from evenly spaced color stops

use crate::color::{lerp_color, Color};

/// Linearly segmented colormap.
///
/// Inputs are normalized values: `[0, 1]` spans the stops, anything below
/// or above takes the `under`/`over` color, masked values the `bad` color.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: &'static str,
    stops: Vec<Color>,
    pub under: Color,
    pub over: Color,
    pub bad: Color,
}

impl Colormap {
    /// Build a colormap from its first stop and any further stops;
    /// under/over default to the end stops and bad to transparent.
    pub fn from_stops(name: &'static str, first: Color, rest: &[Color]) -> Self {
        let mut stops = vec![first];
        stops.extend_from_slice(rest);
        let under = first;
        let over = stops.last().copied().unwrap_or(first);
        Self {
            name,
            stops,
            under,
            over,
            bad: Color::transparent(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Color for a normalized value, `None` meaning masked
    pub fn map(&self, value: Option<f64>) -> Color {
        let Some(x) = value else {
            return self.bad;
        };
        if x.is_nan() {
            return self.bad;
        }
        if x < 0.0 {
            return self.under;
        }
        if x > 1.0 {
            return self.over;
        }

        let segments = self.stops.len() - 1;
        if segments == 0 {
            return self.stops[0];
        }
        let position = x * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        let t = (position - index as f64) as f32;
        lerp_color(self.stops[index], self.stops[index + 1], t)
    }
}

/// Diverging dark blue → blue → white → red → dark red
pub fn seismic() -> Colormap {
    Colormap::from_stops(
        "seismic",
        Color::rgb(0.0, 0.0, 0.3),
        &[
            Color::rgb(0.0, 0.0, 1.0),
            Color::rgb(1.0, 1.0, 1.0),
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.5, 0.0, 0.0),
        ],
    )
}

/// Sequential near-white → dark blue (ColorBrewer Blues, 9 classes)
pub fn blues() -> Colormap {
    Colormap::from_stops(
        "Blues",
        Color::from_srgba(0xf7, 0xfb, 0xff, 255),
        &[
            Color::from_srgba(0xde, 0xeb, 0xf7, 255),
            Color::from_srgba(0xc6, 0xdb, 0xef, 255),
            Color::from_srgba(0x9e, 0xca, 0xe1, 255),
            Color::from_srgba(0x6b, 0xae, 0xd6, 255),
            Color::from_srgba(0x42, 0x92, 0xc6, 255),
            Color::from_srgba(0x21, 0x71, 0xb5, 255),
            Color::from_srgba(0x08, 0x51, 0x9c, 255),
            Color::from_srgba(0x08, 0x30, 0x6b, 255),
        ],
    )
}
