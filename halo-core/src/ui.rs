//! UI toolkit port
//!
//! Types and traits shared with the retained-mode UI toolkit driving the
//! panel. The toolkit owns scheduling: it decides when layout and
//! compositing run and calls back into the bridge through [`UiPlatform`]
//! for the three services it cannot provide itself - a timebase, pointer
//! state and pixel transport. The bridge hands the toolkit a borrowed
//! platform view for the duration of each [`UiToolkit::process`] call, so
//! no global state is needed to route the callbacks.

/// A rectangular pixel region, panel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    /// Left edge in pixels
    pub x: u16,
    /// Top edge in pixels
    pub y: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Area {
    /// Create a new area
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered by the area
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Pointer state delivered to the toolkit on each input poll
///
/// A released pointer carries no coordinates; the toolkit keeps using the
/// last pressed position for release processing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointerEvent {
    /// A finger is down at the given panel position
    Pressed {
        /// Horizontal position in pixels
        x: u16,
        /// Vertical position in pixels
        y: u16,
    },
    /// No finger on the panel
    Released,
}

/// Display refresh strategy requested from the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Only dirty regions are redrawn and flushed per cycle
    Partial,
    /// The full frame is redrawn every cycle
    Full,
}

/// Flush completion token
///
/// The toolkit constructs one around its own completion flag and passes it
/// with every flush request. The platform consumes the token exactly once
/// on every path - including defensive no-op paths - because the toolkit
/// stalls waiting for the flag otherwise. Consuming `self` makes double
/// completion unrepresentable.
pub struct FlushDone<'a> {
    flag: &'a mut bool,
}

impl<'a> FlushDone<'a> {
    /// Create a fresh token; clears the flag it reports through
    pub fn new(flag: &'a mut bool) -> Self {
        *flag = false;
        Self { flag }
    }

    /// Signal that the flush finished
    pub fn complete(self) {
        *self.flag = true;
    }
}

/// Services the bridge provides to the toolkit
///
/// Borrowed by [`UiToolkit::process`] for the duration of one work cycle.
pub trait UiPlatform {
    /// Monotonic milliseconds for the toolkit's tick counter
    fn tick_ms(&mut self) -> u32;

    /// Current pointer state, from the cached touch sample
    ///
    /// Must never block; freshness is whatever the last bridge update
    /// cached.
    fn read_pointer(&mut self) -> PointerEvent;

    /// Transfer a rendered rectangle to the panel
    ///
    /// `px_map` holds packed RGB565 rows for `area`, each row padded to the
    /// toolkit's stride alignment. Implementations must consume `done`
    /// exactly once, whatever path they take.
    fn flush(&mut self, area: &Area, px_map: &[u16], done: FlushDone<'_>);
}

/// Contract of the retained-mode UI toolkit
///
/// The bridge drives this surface and nothing more: one-time runtime
/// setup, display/input object creation, and the periodic work entry
/// point.
pub trait UiToolkit {
    /// One-time runtime initialization; called before any object creation
    fn init(&mut self);

    /// Create the display object
    ///
    /// # Arguments
    /// - `width`, `height`: panel geometry in pixels
    /// - `buffer_pixels`: size of the caller-owned working buffer handed to
    ///   every [`process`](UiToolkit::process) call
    /// - `mode`: refresh strategy
    fn create_display(&mut self, width: u16, height: u16, buffer_pixels: usize, mode: RefreshMode);

    /// Create a pointer-type input device polled through
    /// [`UiPlatform::read_pointer`]
    fn create_pointer(&mut self);

    /// Run due timers, layout and compositing
    ///
    /// `frame` is the working buffer registered via
    /// [`create_display`](UiToolkit::create_display). For every dirty
    /// rectangle the toolkit renders into `frame` and synchronously calls
    /// [`UiPlatform::flush`] before returning.
    fn process(&mut self, frame: &mut [u16], platform: &mut dyn UiPlatform);
}
