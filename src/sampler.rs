//! Screen sampling and change suppression.
//!
//! A frame is downsampled to a small fixed resolution, every channel is
//! averaged over the sampled pixels, and the result only becomes the new
//! target when at least one channel moved by more than the threshold.

use embassy_time::Duration;
use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::clock::to_std;
use crate::color::{Rgb, within_threshold};
use crate::config::Resolution;
use crate::device::FrameSource;
use crate::error::{CaptureError, SampleError};
use crate::state::SharedColorState;

/// Result of a successful sampler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The candidate became the new target
    Published(Rgb),
    /// The candidate was within the threshold of the current target
    Suppressed(Rgb),
}

/// Check if `candidate` differs enough from `published` to be accepted
///
/// The metric is the per-channel absolute difference: the candidate is
/// rejected when every channel is within `threshold`.
pub fn accepts(candidate: Rgb, published: Rgb, threshold: u8) -> bool {
    !within_threshold(candidate, published, threshold)
}

/// Arithmetic mean of every channel, truncated
///
/// Returns `None` for an image without pixels.
#[allow(clippy::cast_possible_truncation)]
pub fn average_color(image: &RgbImage) -> Option<Rgb> {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return None;
    }

    let (mut sum_r, mut sum_g, mut sum_b) = (0u64, 0u64, 0u64);
    for pixel in image.pixels() {
        let [r, g, b] = pixel.0;
        sum_r += u64::from(r);
        sum_g += u64::from(g);
        sum_b += u64::from(b);
    }

    Some(Rgb {
        r: (sum_r / count) as u8,
        g: (sum_g / count) as u8,
        b: (sum_b / count) as u8,
    })
}

/// Periodic frame sampler
#[derive(Debug, Clone)]
pub struct FrameSampler {
    resolution: Resolution,
    threshold: u8,
    capture_timeout: Duration,
}

impl FrameSampler {
    pub const fn new(resolution: Resolution, threshold: u8, capture_timeout: Duration) -> Self {
        Self {
            resolution,
            threshold,
            capture_timeout,
        }
    }

    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Downsample `frame` and return its average color
    pub fn sample(&self, frame: &RgbImage) -> Result<Rgb, SampleError> {
        let Resolution { width, height } = self.resolution;
        if frame.width() == 0 || frame.height() == 0 || width == 0 || height == 0 {
            return Err(SampleError::EmptyFrame);
        }

        let resized;
        let downsampled = if frame.dimensions() == (width, height) {
            frame
        } else {
            resized = imageops::resize(frame, width, height, FilterType::Triangle);
            &resized
        };

        average_color(downsampled).ok_or(SampleError::EmptyFrame)
    }

    /// Run one sampler tick
    ///
    /// Acquires a frame under the capture timeout, averages it and publishes
    /// the candidate to `state` if it passes the threshold. On error nothing
    /// is published.
    pub async fn tick<S: FrameSource>(
        &self,
        source: &mut S,
        state: &SharedColorState,
    ) -> Result<SampleOutcome, SampleError> {
        let frame = tokio::time::timeout(to_std(self.capture_timeout), source.capture_frame())
            .await
            .map_err(|_| CaptureError::Timeout)??;

        let candidate = self.sample(&frame)?;
        if !accepts(candidate, state.target(), self.threshold) {
            return Ok(SampleOutcome::Suppressed(candidate));
        }

        state.publish_target(candidate);
        Ok(SampleOutcome::Published(candidate))
    }
}
