//! Screen-driven ambient lighting for BLE LED strips.
//!
//! A sampler periodically reduces the screen to one dominant color, a
//! motion loop moves the strip's current color toward it, and every step
//! is sent to the strip without waiting for the write to complete.

pub mod bledom;
pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod easing;
pub mod engine;
pub mod error;
pub mod motion;
pub mod sampler;
pub mod scheduler;
pub mod state;
pub mod transition;

#[cfg(feature = "ble")]
pub mod ble;
#[cfg(feature = "capture")]
pub mod capture;

pub use config::{MonitorSelector, Resolution, SyncConfig};
pub use device::{DeviceScanner, DiscoveredDevice, FrameSource, LedConnector, LedSink};
pub use dispatch::Dispatcher;
pub use engine::{MotionEngine, SyncEngine, discover};
pub use error::{CaptureError, ConfigError, DeviceError, EngineError, SampleError};
pub use motion::{Motion, MotionModel, MotionPolicy};
pub use sampler::{FrameSampler, SampleOutcome};
pub use scheduler::TickScheduler;
pub use state::{ColorSnapshot, SharedColorState};

pub use color::{ColorF, Rgb};
pub use easing::{Easing, EasingMode};
pub use embassy_time::{Duration, Instant};
