//! Change-suppressed, fire-and-forget color dispatch.
//!
//! Every accepted color is sent from its own task so a slow strip can not
//! delay the motion loop. Overlapping sends race each other and no ordering
//! between them is guaranteed: a stale command may reach the strip after a
//! newer one and stays there until the next change.
//!
//! Each send is bounded by a timeout, so a stalled strip holds at most
//! `timeout / tick period` sends in flight.

use std::sync::Arc;

use embassy_time::Duration;
use log::{error, warn};
use tokio::task::JoinSet;

use crate::color::{Rgb, within_threshold};
use crate::device::{LedSink, with_timeout};

/// Sends colors to the sink without waiting for them
pub struct Dispatcher<S: LedSink> {
    sink: Arc<S>,
    /// Last color handed to the sink, not necessarily delivered
    last_sent: Option<Rgb>,
    epsilon: u8,
    /// Budget of a single send
    timeout: Duration,
    in_flight: JoinSet<()>,
}

impl<S: LedSink> Dispatcher<S> {
    pub fn new(sink: Arc<S>, epsilon: u8, timeout: Duration) -> Self {
        Self {
            sink,
            last_sent: None,
            epsilon,
            timeout,
            in_flight: JoinSet::new(),
        }
    }

    /// Treat `color` as already sent, e.g. the color set during startup
    #[must_use]
    pub fn with_last_sent(mut self, color: Rgb) -> Self {
        self.last_sent = Some(color);
        self
    }

    pub const fn last_sent(&self) -> Option<Rgb> {
        self.last_sent
    }

    /// Number of sends that have not been reaped yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Send `color` unless it matches the last dispatched color
    ///
    /// Must be called from within a Tokio runtime. Returns `true` if a send
    /// was started. The send is never awaited here; its failure is logged
    /// and otherwise ignored, the next change resends anyway.
    pub fn dispatch(&mut self, color: Rgb) -> bool {
        self.reap();

        if let Some(last) = self.last_sent {
            if within_threshold(color, last, self.epsilon) {
                return false;
            }
        }

        self.last_sent = Some(color);
        let sink = Arc::clone(&self.sink);
        let timeout = self.timeout;
        self.in_flight.spawn(async move {
            if let Err(e) = with_timeout(timeout, sink.set_color(color)).await {
                warn!("Failed to set color {},{},{}: {e}", color.r, color.g, color.b);
            }
        });
        true
    }

    /// Wait for every in-flight send to finish
    pub async fn flush(&mut self) {
        while let Some(result) = self.in_flight.join_next().await {
            Self::check_join(result);
        }
    }

    /// Drop finished sends from the set
    fn reap(&mut self) {
        while let Some(result) = self.in_flight.try_join_next() {
            Self::check_join(result);
        }
    }

    fn check_join(result: Result<(), tokio::task::JoinError>) {
        if let Err(e) = result {
            if e.is_panic() {
                error!("Color send panicked: {e}");
            }
        }
    }
}
