//! Ports to the external collaborators of the engine.
//!
//! The engine is generic over these traits; the `ble` and `capture`
//! features provide the desktop implementations.

use core::fmt;
use core::future::Future;

use embassy_time::Duration;
use image::RgbImage;

use crate::clock::to_std;
use crate::color::Rgb;
use crate::error::{CaptureError, DeviceError};

/// Await a device call under `timeout`
pub async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, DeviceError>>,
) -> Result<T, DeviceError> {
    tokio::time::timeout(to_std(timeout), call)
        .await
        .map_err(|_| DeviceError::Timeout)?
}

/// Source of raw screen frames
pub trait FrameSource: Send {
    /// Capture one full-resolution frame
    fn capture_frame(&mut self) -> impl Future<Output = Result<RgbImage, CaptureError>> + Send;
}

/// Connected LED strip
///
/// Calls are not serialized by the engine: several `set_color` requests may
/// be in flight at once.
pub trait LedSink: Send + Sync + 'static {
    fn power_on(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    fn set_color(&self, color: Rgb) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Release the connection
    fn disconnect(&self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        async { Ok(()) }
    }
}

/// Opens connections to LED strips by address
pub trait LedConnector {
    type Sink: LedSink;

    fn connect(&self, address: &str) -> impl Future<Output = Result<Self::Sink, DeviceError>> + Send;
}

/// One-shot discovery of nearby devices
pub trait DeviceScanner {
    /// Scan for devices during `window`
    fn scan(
        &self,
        window: Duration,
    ) -> impl Future<Output = Result<Vec<DiscoveredDevice>, DeviceError>> + Send;
}

/// Device found by a discovery scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub address: String,
    pub name: Option<String>,
    /// Signal strength in dBm
    pub rssi: Option<i16>,
}

impl fmt::Display for DiscoveredDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.name.as_deref().unwrap_or("None"))?;
        if let Some(rssi) = self.rssi {
            write!(f, " ({rssi} dBm)")?;
        }
        Ok(())
    }
}
