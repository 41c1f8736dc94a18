//! Error taxonomy of the synchronization engine.
//!
//! Capture errors are recovered by skipping a sampler tick, device errors are
//! fatal during startup only, and configuration errors route the binary into
//! discovery mode.

use std::fmt;

/// Failure of the frame source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The OS capture primitive could not produce a frame
    Unavailable(String),
    /// A frame was produced but its buffer is not a valid image
    Malformed(String),
    /// Capture did not finish within the per-tick budget
    Timeout,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "Screen capture unavailable: {e}"),
            Self::Malformed(e) => write!(f, "Malformed frame: {e}"),
            Self::Timeout => write!(f, "Screen capture timed out"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Failure of a single sampler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    Capture(CaptureError),
    /// The frame (or its downsample) contains no pixels
    EmptyFrame,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture(e) => write!(f, "{e}"),
            Self::EmptyFrame => write!(f, "Frame has no pixels to sample"),
        }
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Capture(e) => Some(e),
            Self::EmptyFrame => None,
        }
    }
}

impl From<CaptureError> for SampleError {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

/// Failure of the LED sink or its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// No device (or adapter) matched the request
    NotFound(String),
    Disconnected,
    /// The device refused the write
    Rejected(String),
    Timeout,
    Transport(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "Device not found: {what}"),
            Self::Disconnected => write!(f, "Device disconnected"),
            Self::Rejected(e) => write!(f, "Write rejected: {e}"),
            Self::Timeout => write!(f, "Device timeout"),
            Self::Transport(e) => write!(f, "Transport error: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Invalid or missing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Target device address is unset or blank
    MissingAddress,
    InvalidValue {
        name: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAddress => write!(f, "Target device address is not set"),
            Self::InvalidValue { name, reason } => write!(f, "Invalid {name}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fatal engine failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Config(ConfigError),
    Device(DeviceError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Device(e) => write!(f, "Device error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Device(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<DeviceError> for EngineError {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}
