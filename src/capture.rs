//! Desktop screen capture built on `xcap`.

use core::future::Future;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use log::trace;
use xcap::Monitor;

use crate::config::MonitorSelector;
use crate::device::FrameSource;
use crate::error::CaptureError;

/// Captures one monitor, or all of them, from a blocking worker thread
#[derive(Debug, Clone, Copy)]
pub struct ScreenCapture {
    monitor: MonitorSelector,
}

impl ScreenCapture {
    pub const fn new(monitor: MonitorSelector) -> Self {
        Self { monitor }
    }

    pub const fn monitor(&self) -> MonitorSelector {
        self.monitor
    }
}

impl FrameSource for ScreenCapture {
    fn capture_frame(&mut self) -> impl Future<Output = Result<RgbImage, CaptureError>> + Send {
        let selector = self.monitor;
        async move {
            tokio::task::spawn_blocking(move || grab(selector))
                .await
                .map_err(|e| CaptureError::Unavailable(format!("capture worker: {e}")))?
        }
    }
}

fn grab(selector: MonitorSelector) -> Result<RgbImage, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::Unavailable(e.to_string()))?;
    if monitors.is_empty() {
        return Err(CaptureError::Unavailable("no monitors".into()));
    }

    match selector {
        MonitorSelector::Index(index) => {
            let count = monitors.len();
            let monitor = index.checked_sub(1).and_then(|i| monitors.into_iter().nth(i));
            let monitor = monitor.ok_or_else(|| {
                CaptureError::Unavailable(format!("monitor {index} of {count} does not exist"))
            })?;
            capture_monitor(&monitor)
        }
        MonitorSelector::All => {
            let frames = monitors
                .iter()
                .map(capture_monitor)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(stack_frames(&frames))
        }
    }
}

fn capture_monitor(monitor: &Monitor) -> Result<RgbImage, CaptureError> {
    let captured = monitor
        .capture_image()
        .map_err(|e| CaptureError::Unavailable(e.to_string()))?;
    let (width, height) = captured.dimensions();
    trace!("Captured {width}x{height} frame");

    let rgba = RgbaImage::from_raw(width, height, captured.into_raw())
        .ok_or_else(|| CaptureError::Malformed(format!("{width}x{height} buffer size mismatch")))?;
    Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
}

/// Scale every frame to the smallest size and stack them vertically
///
/// Each monitor then contributes the same number of pixels to the average.
pub fn stack_frames(frames: &[RgbImage]) -> RgbImage {
    let width = frames.iter().map(RgbImage::width).min().unwrap_or(0);
    let height = frames.iter().map(RgbImage::height).min().unwrap_or(0);
    let Ok(count) = u32::try_from(frames.len()) else {
        return RgbImage::new(0, 0);
    };

    let mut canvas = RgbImage::new(width, height * count);
    if width == 0 || height == 0 {
        return canvas;
    }
    for (row, frame) in (0u32..).zip(frames) {
        let scaled = if frame.dimensions() == (width, height) {
            frame.clone()
        } else {
            imageops::resize(frame, width, height, FilterType::Triangle)
        };
        imageops::replace(&mut canvas, &scaled, 0, i64::from(row * height));
    }
    canvas
}
