//! Command line and environment surface.
//!
//! Every option can also be set through the environment variable named next
//! to it, which is how the device address is usually provided. A `.env` file
//! is read into the environment first.

use std::path::Path;

use clap::Parser;
use embassy_time::Duration;

use crate::color::{Rgb, parse_rgb};
use crate::config::{MonitorSelector, Resolution, SyncConfig};
use crate::easing::{Easing, EasingMode};
use crate::motion::{MotionPolicy, PolicyKind};

/// Load a `.env` file into the process environment
///
/// Reads `path`, or `.env` from the working directory and its parents when
/// `None`. Variables already present in the environment are kept.
pub fn load_env_file(path: Option<&Path>) -> Result<(), dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    }
}

/// Sync an LED strip with the average color of the screen
#[derive(Debug, Clone, Parser)]
#[command(name = "myrtio-ambilight", version, about)]
pub struct Cli {
    /// Address of the LED strip. Runs a discovery scan when empty
    #[arg(long, env = "TARGET_DEVICE")]
    pub device: Option<String>,

    /// Time between screen captures in milliseconds
    #[arg(long, env = "SAMPLE_PERIOD_MS", default_value_t = 16)]
    pub sample_period_ms: u64,

    /// Time between motion ticks in milliseconds
    #[arg(long, env = "MOTION_PERIOD_MS", default_value_t = 16)]
    pub motion_period_ms: u64,

    /// Per-channel change required to accept a new screen color
    #[arg(long, env = "CHANGE_THRESHOLD", default_value_t = 10)]
    pub change_threshold: u8,

    /// Per-channel change required to send a new color to the strip
    #[arg(long, env = "DISPATCH_EPSILON", default_value_t = 0)]
    pub dispatch_epsilon: u8,

    /// Motion policy: `fixed-step` or `eased`
    #[arg(long, env = "MOTION_POLICY", default_value = "eased")]
    pub policy: PolicyKind,

    /// Number of ticks a fixed-step motion takes
    #[arg(long, env = "MOTION_STEPS", default_value_t = 10)]
    pub steps: u16,

    /// Duration of an eased transition in milliseconds
    #[arg(long, env = "TWEEN_TIME_MS", default_value_t = 500)]
    pub tween_time_ms: u64,

    /// Easing curve: linear, quad, cubic, quart or sine
    #[arg(long, env = "TWEEN_EASE", default_value = "quad")]
    pub ease: Easing,

    /// Easing mode: in, out or in-out
    #[arg(long, env = "TWEEN_MODE", default_value = "in-out")]
    pub mode: EasingMode,

    /// Capture resolution as WIDTHxHEIGHT. Bigger is slower but more accurate
    #[arg(long, env = "RESOLUTION", default_value = "64x64")]
    pub resolution: Resolution,

    /// Monitor to capture, starting from 1. `all` (or -1) for every monitor
    #[arg(long, env = "MONITOR_INDEX", default_value = "1", allow_hyphen_values = true)]
    pub monitor: MonitorSelector,

    /// Initial color as r,g,b or #rrggbb
    #[arg(long, env = "INIT_COLOR", default_value = "0,0,0", value_parser = parse_rgb)]
    pub init_color: Rgb,

    /// Screen capture timeout in milliseconds
    #[arg(long, env = "CAPTURE_TIMEOUT_MS", default_value_t = 1000)]
    pub capture_timeout_ms: u64,

    /// Connect, power-on and initial color timeout in milliseconds
    #[arg(long, env = "DEVICE_TIMEOUT_MS", default_value_t = 10_000)]
    pub device_timeout_ms: u64,

    /// Duration of the discovery scan in seconds
    #[arg(long, env = "SCAN_SECONDS", default_value_t = 5)]
    pub scan_seconds: u64,
}

impl Cli {
    pub fn motion_policy(&self) -> MotionPolicy {
        match self.policy {
            PolicyKind::FixedStep => MotionPolicy::FixedStep { steps: self.steps },
            PolicyKind::Eased => MotionPolicy::Eased {
                duration: Duration::from_millis(self.tween_time_ms),
                easing: self.ease,
                mode: self.mode,
            },
        }
    }

    pub fn into_config(self) -> SyncConfig {
        SyncConfig {
            motion: self.motion_policy(),
            address: self.device,
            sample_period: Duration::from_millis(self.sample_period_ms),
            motion_period: Duration::from_millis(self.motion_period_ms),
            change_threshold: self.change_threshold,
            dispatch_epsilon: self.dispatch_epsilon,
            resolution: self.resolution,
            monitor: self.monitor,
            initial_color: self.init_color,
            capture_timeout: Duration::from_millis(self.capture_timeout_ms),
            device_timeout: Duration::from_millis(self.device_timeout_ms),
            scan_window: Duration::from_secs(self.scan_seconds),
        }
    }
}
