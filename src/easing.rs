//! Easing curves for time-boxed transitions.
//!
//! Every curve maps progress `0.0..=1.0` onto `0.0..=1.0`, is monotonic and
//! never overshoots, so an eased value always stays between its endpoints.

use core::fmt;
use core::str::FromStr;

const EASING_NAME_LINEAR: &str = "linear";
const EASING_NAME_QUAD: &str = "quad";
const EASING_NAME_CUBIC: &str = "cubic";
const EASING_NAME_QUART: &str = "quart";
const EASING_NAME_SINE: &str = "sine";

const MODE_NAME_IN: &str = "in";
const MODE_NAME_OUT: &str = "out";
const MODE_NAME_IN_OUT: &str = "in-out";

/// Shape of the easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    Quad,
    Cubic,
    Quart,
    Sine,
}

/// Which end of the curve is eased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingMode {
    In,
    Out,
    #[default]
    InOut,
}

impl Easing {
    /// Ease-in form of the curve
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Quart => t * t * t * t,
            Self::Sine => 1.0 - libm::cosf(t * core::f32::consts::FRAC_PI_2),
        }
    }

    /// Map linear progress through the curve
    ///
    /// Progress outside `0.0..=1.0` is clamped first.
    pub fn apply(self, mode: EasingMode, progress: f32) -> f32 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        let eased = match mode {
            EasingMode::In => self.ease_in(t),
            EasingMode::Out => 1.0 - self.ease_in(1.0 - t),
            EasingMode::InOut => {
                if t < 0.5 {
                    self.ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - self.ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
        };
        eased.clamp(0.0, 1.0)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => EASING_NAME_LINEAR,
            Self::Quad => EASING_NAME_QUAD,
            Self::Cubic => EASING_NAME_CUBIC,
            Self::Quart => EASING_NAME_QUART,
            Self::Sine => EASING_NAME_SINE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EASING_NAME_LINEAR => Some(Self::Linear),
            EASING_NAME_QUAD => Some(Self::Quad),
            EASING_NAME_CUBIC => Some(Self::Cubic),
            EASING_NAME_QUART => Some(Self::Quart),
            EASING_NAME_SINE => Some(Self::Sine),
            _ => None,
        }
    }
}

impl EasingMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => MODE_NAME_IN,
            Self::Out => MODE_NAME_OUT,
            Self::InOut => MODE_NAME_IN_OUT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_IN => Some(Self::In),
            MODE_NAME_OUT => Some(Self::Out),
            MODE_NAME_IN_OUT | "in_out" => Some(Self::InOut),
            _ => None,
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_from_str(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown easing curve `{s}`"))
    }
}

impl FromStr for EasingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_from_str(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown easing mode `{s}`"))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
