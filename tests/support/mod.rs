//! In-memory ports shared by the integration tests.
#![allow(dead_code)]

use std::future::{Future, pending};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use image::RgbImage;
use myrtio_ambilight::{
    CaptureError, DeviceError, DeviceScanner, DiscoveredDevice, Duration, FrameSource,
    LedConnector, LedSink, Rgb,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    PowerOn,
    Color(Rgb),
    Disconnect,
}

/// Sink that records every call
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<SinkEvent>>>,
    /// Never complete `power_on`
    stall_power_on: bool,
    /// Never complete `set_color` while set
    stall_colors: Arc<AtomicBool>,
}

impl RecordingSink {
    pub fn stalling_power_on() -> Self {
        Self {
            stall_power_on: true,
            ..Self::default()
        }
    }

    pub fn stalling_colors() -> Self {
        let sink = Self::default();
        sink.start_stalling_colors();
        sink
    }

    /// Make every later `set_color` hang, shared by all clones
    pub fn start_stalling_colors(&self) {
        self.stall_colors.store(true, Ordering::SeqCst);
    }

    /// Number of live clones, including ones held by spawned sends
    pub fn handles(&self) -> usize {
        Arc::strong_count(&self.events)
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn colors(&self) -> Vec<Rgb> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Color(color) => Some(color),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

async fn finish(stall: bool) -> Result<(), DeviceError> {
    if stall {
        pending::<()>().await;
    }
    Ok(())
}

impl LedSink for RecordingSink {
    fn power_on(&self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.record(SinkEvent::PowerOn);
        finish(self.stall_power_on)
    }

    fn set_color(&self, color: Rgb) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.record(SinkEvent::Color(color));
        finish(self.stall_colors.load(Ordering::SeqCst))
    }

    fn disconnect(&self) -> impl Future<Output = Result<(), DeviceError>> + Send {
        self.record(SinkEvent::Disconnect);
        finish(false)
    }
}

/// Connector handing out clones of one recording sink
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub sink: RecordingSink,
    addresses: Arc<Mutex<Vec<String>>>,
}

impl FakeConnector {
    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().unwrap().clone()
    }
}

impl LedConnector for FakeConnector {
    type Sink = RecordingSink;

    fn connect(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<RecordingSink, DeviceError>> + Send {
        self.addresses.lock().unwrap().push(address.to_owned());
        let sink = self.sink.clone();
        async move { Ok(sink) }
    }
}

pub struct FakeScanner(pub Vec<DiscoveredDevice>);

impl DeviceScanner for FakeScanner {
    fn scan(
        &self,
        _window: Duration,
    ) -> impl Future<Output = Result<Vec<DiscoveredDevice>, DeviceError>> + Send {
        let devices = self.0.clone();
        async move { Ok(devices) }
    }
}

/// Screen showing one solid color that tests can change
#[derive(Debug, Clone)]
pub struct SolidScreen {
    color: Arc<Mutex<Rgb>>,
    width: u32,
    height: u32,
}

impl SolidScreen {
    pub fn new(color: Rgb, width: u32, height: u32) -> Self {
        Self {
            color: Arc::new(Mutex::new(color)),
            width,
            height,
        }
    }

    pub fn show(&self, color: Rgb) {
        *self.color.lock().unwrap() = color;
    }
}

impl FrameSource for SolidScreen {
    fn capture_frame(&mut self) -> impl Future<Output = Result<RgbImage, CaptureError>> + Send {
        let frame = solid_frame(*self.color.lock().unwrap(), self.width, self.height);
        async move { Ok(frame) }
    }
}

/// Screen whose capture never completes
pub struct FrozenScreen;

impl FrameSource for FrozenScreen {
    fn capture_frame(&mut self) -> impl Future<Output = Result<RgbImage, CaptureError>> + Send {
        pending()
    }
}

/// Screen whose capture always fails
pub struct BrokenScreen;

impl FrameSource for BrokenScreen {
    fn capture_frame(&mut self) -> impl Future<Output = Result<RgbImage, CaptureError>> + Send {
        async { Err(CaptureError::Unavailable("no display".into())) }
    }
}

pub fn solid_frame(color: Rgb, width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, image::Rgb([color.r, color.g, color.b]))
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb { r, g, b }
}
