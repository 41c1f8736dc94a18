//! Engine configuration.

use core::fmt;
use core::str::FromStr;

use embassy_time::Duration;

use crate::color::{BLACK, Rgb};
use crate::error::ConfigError;
use crate::motion::MotionPolicy;
use crate::scheduler::{DEFAULT_MOTION_PERIOD, DEFAULT_SAMPLE_PERIOD};

pub const DEFAULT_CHANGE_THRESHOLD: u8 = 10;
pub const DEFAULT_RESOLUTION: Resolution = Resolution {
    width: 64,
    height: 64,
};
pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_DEVICE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SCAN_WINDOW: Duration = Duration::from_secs(5);

/// Downsampled capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
        let width = width.trim().parse().map_err(|e| format!("width: {e}"))?;
        let height = height.trim().parse().map_err(|e| format!("height: {e}"))?;
        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which screen the sampler reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorSelector {
    /// Monitor by 1-based index
    Index(usize),
    /// Every monitor, weighted equally
    All,
}

impl Default for MonitorSelector {
    fn default() -> Self {
        Self::Index(1)
    }
}

impl FromStr for MonitorSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "-1" {
            return Ok(Self::All);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("monitor index starts from 1".into()),
            Ok(index) => Ok(Self::Index(index)),
            Err(e) => Err(format!("`{s}`: {e}")),
        }
    }
}

impl fmt::Display for MonitorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::All => f.write_str("all"),
        }
    }
}

/// Configuration of a synchronization session
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Address of the LED strip, `None` to run discovery instead
    pub address: Option<String>,
    pub sample_period: Duration,
    pub motion_period: Duration,
    /// Minimum per-channel difference for a new target to be accepted
    pub change_threshold: u8,
    /// Maximum per-channel difference treated as "same color" by the dispatcher
    pub dispatch_epsilon: u8,
    pub motion: MotionPolicy,
    pub resolution: Resolution,
    pub monitor: MonitorSelector,
    /// Color set right after power-on
    pub initial_color: Rgb,
    pub capture_timeout: Duration,
    /// Budget for connect, power-on, the initial color and every later send
    pub device_timeout: Duration,
    pub scan_window: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            address: None,
            sample_period: DEFAULT_SAMPLE_PERIOD,
            motion_period: DEFAULT_MOTION_PERIOD,
            change_threshold: DEFAULT_CHANGE_THRESHOLD,
            dispatch_epsilon: 0,
            motion: MotionPolicy::default(),
            resolution: DEFAULT_RESOLUTION,
            monitor: MonitorSelector::default(),
            initial_color: BLACK,
            capture_timeout: DEFAULT_CAPTURE_TIMEOUT,
            device_timeout: DEFAULT_DEVICE_TIMEOUT,
            scan_window: DEFAULT_SCAN_WINDOW,
        }
    }
}

impl SyncConfig {
    /// Address of the target device
    ///
    /// Fails with [`ConfigError::MissingAddress`] when unset or blank.
    pub fn device_address(&self) -> Result<&str, ConfigError> {
        match self.address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Ok(address),
            _ => Err(ConfigError::MissingAddress),
        }
    }

    /// Check every value the engine depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period.as_ticks() == 0 {
            return Err(ConfigError::invalid("sample period", "must be positive"));
        }
        if self.motion_period.as_ticks() == 0 {
            return Err(ConfigError::invalid("motion period", "must be positive"));
        }
        if self.resolution.pixel_count() == 0 {
            return Err(ConfigError::invalid(
                "resolution",
                format!("{} has no pixels", self.resolution),
            ));
        }
        if self.capture_timeout.as_ticks() == 0 {
            return Err(ConfigError::invalid("capture timeout", "must be positive"));
        }
        if self.device_timeout.as_ticks() == 0 {
            return Err(ConfigError::invalid("device timeout", "must be positive"));
        }
        Ok(())
    }
}
