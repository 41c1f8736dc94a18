//! Synchronization engine - startup sequencing and the two periodic loops.
//!
//! The sampler loop publishes targets, the motion loop advances the current
//! color toward them and hands every step to the [`Dispatcher`]. Both loops
//! run inside one future and are cancelled together.

use core::future::Future;
use std::sync::Arc;

use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::bledom;
use crate::clock::MonotonicClock;
use crate::color::Rgb;
use crate::config::SyncConfig;
pub use crate::device::with_timeout;
use crate::device::{DeviceScanner, DiscoveredDevice, FrameSource, LedConnector, LedSink};
use crate::dispatch::Dispatcher;
use crate::error::{DeviceError, EngineError, SampleError};
use crate::motion::{Motion, MotionModel};
use crate::sampler::{FrameSampler, SampleOutcome};
use crate::scheduler::TickScheduler;
use crate::state::SharedColorState;

/// Scan for nearby devices
pub async fn discover<D: DeviceScanner>(
    scanner: &D,
    window: Duration,
) -> Result<Vec<DiscoveredDevice>, DeviceError> {
    info!("Scanning for devices...");
    let devices = scanner.scan(window).await?;
    info!("Found {} devices", devices.len());
    for device in &devices {
        if device.name.as_deref().is_some_and(bledom::is_bledom_name) {
            info!("Compatible strip: {device}");
        }
    }
    Ok(devices)
}

/// Motion side of the engine: retargets on new targets, steps and dispatches
pub struct MotionEngine<S: LedSink> {
    motion: Motion,
    dispatcher: Dispatcher<S>,
    /// Revision of the target the motion is heading to
    revision: u64,
}

impl<S: LedSink> MotionEngine<S> {
    pub fn new(motion: Motion, dispatcher: Dispatcher<S>, revision: u64) -> Self {
        Self {
            motion,
            dispatcher,
            revision,
        }
    }

    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    /// Run one motion tick and return the current color
    pub fn tick(&mut self, state: &SharedColorState, now: Instant) -> Rgb {
        let snapshot = state.snapshot();
        if snapshot.revision != self.revision {
            self.revision = snapshot.revision;
            self.motion.retarget(snapshot.target, now);
        }

        let current = self.motion.advance(now).to_rgb();
        state.set_current(current);
        self.dispatcher.dispatch(current);
        current
    }
}

/// Running synchronization session bound to one LED sink
pub struct SyncEngine<S: LedSink> {
    config: SyncConfig,
    sink: Arc<S>,
    state: Arc<SharedColorState>,
}

impl<S: LedSink> SyncEngine<S> {
    /// Connect to the configured device and run the startup sequence
    pub async fn connect<C>(connector: &C, config: SyncConfig) -> Result<Self, EngineError>
    where
        C: LedConnector<Sink = S>,
    {
        // A missing address sends the caller to discovery whatever else is set
        let address = config.device_address()?;
        config.validate()?;

        info!("Connecting to device {address}...");
        let sink = with_timeout(config.device_timeout, connector.connect(address)).await?;
        info!("Connected to device");

        Self::start(sink, config).await
    }

    /// Power the sink on and set the initial color
    ///
    /// Power-on completes before any color command is issued.
    pub async fn start(sink: S, config: SyncConfig) -> Result<Self, EngineError> {
        config.validate()?;

        with_timeout(config.device_timeout, sink.power_on()).await?;
        info!("Device powered on");

        let initial = config.initial_color;
        with_timeout(config.device_timeout, sink.set_color(initial)).await?;
        debug!("Initial color {},{},{}", initial.r, initial.g, initial.b);

        Ok(Self {
            state: Arc::new(SharedColorState::new(initial)),
            sink: Arc::new(sink),
            config,
        })
    }

    pub fn state(&self) -> Arc<SharedColorState> {
        Arc::clone(&self.state)
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run both loops until `shutdown` resolves
    ///
    /// Both loops and every in-flight send are cancelled as a unit, then the
    /// sink is disconnected. Dropping the returned future early does the same,
    /// with the disconnect moved to a background task.
    pub async fn run<F: FrameSource>(self, source: F, shutdown: impl Future<Output = ()>) {
        let clock = MonotonicClock::new();
        let sampler = FrameSampler::new(
            self.config.resolution,
            self.config.change_threshold,
            self.config.capture_timeout,
        );
        let release = SinkRelease::new(Arc::clone(&self.sink), self.config.device_timeout);
        let dispatcher = Dispatcher::new(
            Arc::clone(&self.sink),
            self.config.dispatch_epsilon,
            self.config.device_timeout,
        )
        .with_last_sent(self.config.initial_color);
        let motion = MotionEngine::new(
            Motion::new(self.config.motion, self.config.initial_color),
            dispatcher,
            self.state.snapshot().revision,
        );

        info!(
            "Syncing: sample every {} ms, motion every {} ms, threshold {}",
            self.config.sample_period.as_millis(),
            self.config.motion_period.as_millis(),
            self.config.change_threshold,
        );

        tokio::select! {
            () = sampler_loop(&sampler, source, &self.state, &clock, self.config.sample_period) => {}
            () = motion_loop(motion, &self.state, &clock, self.config.motion_period) => {}
            () = shutdown => info!("Shutting down"),
        }

        release.disconnect().await;
    }
}

/// Disconnects the sink exactly once, on every exit path of [`SyncEngine::run`]
struct SinkRelease<S: LedSink> {
    sink: Option<Arc<S>>,
    timeout: Duration,
}

impl<S: LedSink> SinkRelease<S> {
    fn new(sink: Arc<S>, timeout: Duration) -> Self {
        Self {
            sink: Some(sink),
            timeout,
        }
    }

    async fn disconnect(mut self) {
        if let Some(sink) = self.sink.take() {
            release(sink, self.timeout).await;
        }
    }
}

impl<S: LedSink> Drop for SinkRelease<S> {
    fn drop(&mut self) {
        let Some(sink) = self.sink.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(release(sink, self.timeout));
            }
            Err(_) => warn!("No runtime left to disconnect the device"),
        }
    }
}

async fn release<S: LedSink>(sink: Arc<S>, timeout: Duration) {
    match with_timeout(timeout, sink.disconnect()).await {
        Ok(()) => info!("Disconnected from device"),
        Err(e) => warn!("Failed to disconnect: {e}"),
    }
}

async fn sampler_loop<F: FrameSource>(
    sampler: &FrameSampler,
    mut source: F,
    state: &SharedColorState,
    clock: &MonotonicClock,
    period: Duration,
) {
    let mut scheduler = TickScheduler::new(period);
    loop {
        match sampler.tick(&mut source, state).await {
            Ok(SampleOutcome::Published(target)) => {
                debug!("New target {},{},{}", target.r, target.g, target.b);
            }
            Ok(SampleOutcome::Suppressed(_)) => {}
            Err(SampleError::EmptyFrame) => debug!("Skipping empty frame"),
            Err(e) => warn!("Skipping sample: {e}"),
        }

        let next = scheduler.tick(clock.now());
        clock.sleep(next.sleep_duration).await;
    }
}

async fn motion_loop<S: LedSink>(
    mut engine: MotionEngine<S>,
    state: &SharedColorState,
    clock: &MonotonicClock,
    period: Duration,
) {
    let mut scheduler = TickScheduler::new(period);
    loop {
        engine.tick(state, clock.now());

        let next = scheduler.tick(clock.now());
        clock.sleep(next.sleep_duration).await;
    }
}
