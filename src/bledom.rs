//! ELK-BLEDOM wire protocol.
//!
//! Every command is a fixed 9-byte frame `7E <len> <cmd> ... EF` written
//! without response to a single characteristic.

use crate::color::Rgb;

/// 16-bit UUID of the write characteristic (`0000fff3-0000-1000-8000-00805f9b34fb`)
pub const WRITE_CHARACTERISTIC: u16 = 0xfff3;

/// Advertised name prefix of compatible strips
pub const NAME_PREFIX: &str = "ELK-BLEDOM";

/// Length of every command frame
pub const FRAME_LEN: usize = 9;

const FRAME_START: u8 = 0x7e;
const FRAME_END: u8 = 0xef;

const CMD_POWER: u8 = 0x04;
const CMD_COLOR: u8 = 0x05;

pub type Frame = [u8; FRAME_LEN];

pub const fn power_on_frame() -> Frame {
    [FRAME_START, 0x00, CMD_POWER, 0xf0, 0x00, 0x01, 0xff, 0x00, FRAME_END]
}

pub const fn power_off_frame() -> Frame {
    [FRAME_START, 0x00, CMD_POWER, 0x00, 0x00, 0x00, 0xff, 0x00, FRAME_END]
}

pub const fn color_frame(color: Rgb) -> Frame {
    [
        FRAME_START,
        0x00,
        CMD_COLOR,
        0x03,
        color.r,
        color.g,
        color.b,
        0x00,
        FRAME_END,
    ]
}

/// Check if an advertised name looks like a compatible strip
pub fn is_bledom_name(name: &str) -> bool {
    name.starts_with(NAME_PREFIX)
}
