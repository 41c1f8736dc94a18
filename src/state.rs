//! Color state shared between the sampler and the motion loop.
//!
//! The whole record sits behind one `critical-section` mutex, so readers
//! always receive a complete copy and never a half-written color. The
//! sampler is the only writer of `target`, the motion loop the only writer
//! of `current`.

use core::cell::Cell;

use critical_section::Mutex;

use crate::color::Rgb;

/// Copy of the shared record at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSnapshot {
    /// Color the light is commanded to right now
    pub current: Rgb,
    /// Color the light is moving toward
    pub target: Rgb,
    /// Incremented on every accepted target
    pub revision: u64,
}

/// Current and target colors shared across tasks
pub struct SharedColorState {
    inner: Mutex<Cell<ColorSnapshot>>,
}

impl SharedColorState {
    /// Create a state resting at `initial`
    pub const fn new(initial: Rgb) -> Self {
        Self {
            inner: Mutex::new(Cell::new(ColorSnapshot {
                current: initial,
                target: initial,
                revision: 0,
            })),
        }
    }

    pub fn snapshot(&self) -> ColorSnapshot {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    pub fn target(&self) -> Rgb {
        self.snapshot().target
    }

    pub fn current(&self) -> Rgb {
        self.snapshot().current
    }

    /// Publish a new target color
    ///
    /// Returns the revision assigned to it.
    pub fn publish_target(&self, target: Rgb) -> u64 {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut snapshot = cell.get();
            snapshot.target = target;
            snapshot.revision = snapshot.revision.wrapping_add(1);
            cell.set(snapshot);
            snapshot.revision
        })
    }

    pub fn set_current(&self, current: Rgb) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut snapshot = cell.get();
            snapshot.current = current;
            cell.set(snapshot);
        });
    }
}

impl Default for SharedColorState {
    fn default() -> Self {
        Self::new(crate::color::BLACK)
    }
}
