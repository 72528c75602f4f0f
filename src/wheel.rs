//! Color wheel geometry
//!
//! A point on the wheel, given as an offset from its center, maps to HSV:
//! the angle is the hue, the distance from the center (clamped to the rim)
//! is the saturation, and brightness rises from 0.3 at the center to 1.0 at
//! the rim.

use crate::color::Rgb;
use palette::{FromColor, Hsv, Srgb};

const MIN_VALUE: f32 = 0.3;
const MAX_VALUE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wheel {
    pub radius: f32,
}

impl Default for Wheel {
    fn default() -> Self {
        Self { radius: 140.0 }
    }
}

impl Wheel {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Color under the offset `(dx, dy)` from the wheel center
    pub fn color_at(&self, dx: f32, dy: f32) -> Rgb {
        let distance = dx.hypot(dy).min(self.radius);
        let saturation = if self.radius > 0.0 {
            (distance / self.radius).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut hue = dy.atan2(dx).to_degrees();
        if hue < 0.0 {
            hue += 360.0;
        }

        let value = MIN_VALUE + saturation * (MAX_VALUE - MIN_VALUE);
        let hsv: Hsv = Hsv::new(hue, saturation, value);
        let rgb: Srgb = Srgb::from_color(hsv);
        let rgb: Srgb<u8> = rgb.into_format();

        Rgb::new(rgb.red, rgb.green, rgb.blue)
    }

    /// Offset from the center where `color`'s hue and saturation sit.
    /// Brightness is not encoded by position, so this is only a left inverse
    /// of [`Wheel::color_at`] for colors the wheel can produce.
    pub fn position_of(&self, color: Rgb) -> (f32, f32) {
        let rgb: Srgb = Srgb::new(color.r, color.g, color.b).into_format();
        let hsv: Hsv = Hsv::from_color(rgb);

        let angle = hsv.hue.into_positive_degrees().to_radians();
        let distance = hsv.saturation * self.radius;

        (distance * angle.cos(), distance * angle.sin())
    }
}
