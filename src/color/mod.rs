mod float;
mod utils;

use smart_leds::RGB8;

pub use float::{ColorF, clamp_channel};
pub use utils::{channel_distance, parse_rgb, rgb_from_u32, within_threshold};

pub type Rgb = RGB8;

/// Color that switches the strip off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
