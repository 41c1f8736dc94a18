//! BLE transport for ELK-BLEDOM strips, built on `btleplug`.

use core::future::Future;

use btleplug::api::{
    Central, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
    bleuuid::uuid_from_u16,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use embassy_time::{Duration, Instant};
use log::{debug, info};

use crate::bledom;
use crate::clock::{MonotonicClock, to_std};
use crate::color::Rgb;
use crate::device::{DeviceScanner, DiscoveredDevice, LedConnector, LedSink};
use crate::error::DeviceError;

/// Pause between peripheral list polls while looking for a device
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn map_error(e: btleplug::Error) -> DeviceError {
    match e {
        btleplug::Error::DeviceNotFound => DeviceError::NotFound("peripheral".into()),
        btleplug::Error::NotConnected => DeviceError::Disconnected,
        btleplug::Error::TimedOut(_) => DeviceError::Timeout,
        btleplug::Error::PermissionDenied => DeviceError::Rejected("permission denied".into()),
        other => DeviceError::Transport(other.to_string()),
    }
}

/// First available Bluetooth adapter
async fn default_adapter() -> Result<Adapter, DeviceError> {
    let manager = Manager::new().await.map_err(map_error)?;
    manager
        .adapters()
        .await
        .map_err(map_error)?
        .into_iter()
        .next()
        .ok_or_else(|| DeviceError::NotFound("bluetooth adapter".into()))
}

async fn find_peripheral(
    adapter: &Adapter,
    address: &str,
    window: Duration,
) -> Result<Peripheral, DeviceError> {
    let clock = MonotonicClock::new();
    let deadline = Instant::from_ticks(0) + window;
    loop {
        for peripheral in adapter.peripherals().await.map_err(map_error)? {
            if peripheral.address().to_string().eq_ignore_ascii_case(address) {
                return Ok(peripheral);
            }
        }
        if clock.now() >= deadline {
            return Err(DeviceError::NotFound(address.to_owned()));
        }
        clock.sleep(POLL_INTERVAL).await;
    }
}

/// Connects to ELK-BLEDOM strips by Bluetooth address
#[derive(Debug, Clone)]
pub struct BleConnector {
    scan_window: Duration,
}

impl BleConnector {
    /// Create a connector that searches for the device for at most `scan_window`
    pub const fn new(scan_window: Duration) -> Self {
        Self { scan_window }
    }
}

impl LedConnector for BleConnector {
    type Sink = BledomSink;

    fn connect(&self, address: &str) -> impl Future<Output = Result<BledomSink, DeviceError>> + Send {
        let address = address.to_owned();
        let window = self.scan_window;
        async move {
            let adapter = default_adapter().await?;
            adapter
                .start_scan(ScanFilter::default())
                .await
                .map_err(map_error)?;
            let found = find_peripheral(&adapter, &address, window).await;
            if let Err(e) = adapter.stop_scan().await {
                debug!("Failed to stop scan: {e}");
            }
            let peripheral = found?;

            peripheral.connect().await.map_err(map_error)?;
            peripheral.discover_services().await.map_err(map_error)?;

            let uuid = uuid_from_u16(bledom::WRITE_CHARACTERISTIC);
            let characteristic = peripheral
                .characteristics()
                .into_iter()
                .find(|c| c.uuid == uuid)
                .ok_or_else(|| DeviceError::NotFound(format!("characteristic {uuid}")))?;

            info!("Using characteristic {uuid} of {address}");
            Ok(BledomSink {
                peripheral,
                characteristic,
            })
        }
    }
}

/// Connected ELK-BLEDOM strip
pub struct BledomSink {
    peripheral: Peripheral,
    characteristic: Characteristic,
}

impl BledomSink {
    async fn write(&self, frame: bledom::Frame) -> Result<(), DeviceError> {
        self.peripheral
            .write(&self.characteristic, &frame, WriteType::WithoutResponse)
            .await
            .map_err(map_error)
    }

    pub async fn power_off(&self) -> Result<(), DeviceError> {
        self.write(bledom::power_off_frame()).await
    }
}

impl LedSink for BledomSink {
    fn power_on(&self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.write(bledom::power_on_frame())
    }

    fn set_color(&self, color: Rgb) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.write(bledom::color_frame(color))
    }

    fn disconnect(&self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        async { self.peripheral.disconnect().await.map_err(map_error) }
    }
}

/// Discovery scan over the default adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct BleScanner;

impl DeviceScanner for BleScanner {
    fn scan(
        &self,
        window: Duration,
    ) -> impl Future<Output = Result<Vec<DiscoveredDevice>, DeviceError>> + Send {
        async move {
            let adapter = default_adapter().await?;
            adapter
                .start_scan(ScanFilter::default())
                .await
                .map_err(map_error)?;
            tokio::time::sleep(to_std(window)).await;
            let peripherals = adapter.peripherals().await.map_err(map_error)?;
            if let Err(e) = adapter.stop_scan().await {
                debug!("Failed to stop scan: {e}");
            }

            let mut devices = Vec::with_capacity(peripherals.len());
            for peripheral in peripherals {
                let properties = peripheral.properties().await.map_err(map_error)?;
                let (name, rssi) = properties
                    .map(|p| (p.local_name, p.rssi))
                    .unwrap_or_default();
                devices.push(DiscoveredDevice {
                    address: peripheral.address().to_string(),
                    name,
                    rssi,
                });
            }
            Ok(devices)
        }
    }
}
