//! Fractional color used as interpolation state.
//!
//! Channels stay fractional between motion ticks and are rounded to
//! integers only when the color leaves the engine.

use core::ops::{Add, Div, Mul, Sub};

use crate::color::Rgb;

/// RGB color with `f32` channels in the 0.0-255.0 range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ColorF {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_channels(channels: [f32; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    pub const fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Clamp every channel into the valid 0.0-255.0 range
    pub fn clamped(self) -> Self {
        Self::new(clamp_f32(self.r), clamp_f32(self.g), clamp_f32(self.b))
    }

    /// Round to the nearest integer color
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: clamp_channel(self.r),
            g: clamp_channel(self.g),
            b: clamp_channel(self.b),
        }
    }
}

impl From<Rgb> for ColorF {
    fn from(color: Rgb) -> Self {
        Self::new(f32::from(color.r), f32::from(color.g), f32::from(color.b))
    }
}

impl Add for ColorF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Sub for ColorF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f32> for ColorF {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Div<f32> for ColorF {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

fn clamp_f32(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 255.0)
}

/// Round a fractional channel and clamp it into `u8`
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_channel(value: f32) -> u8 {
    libm::roundf(clamp_f32(value)) as u8
}
