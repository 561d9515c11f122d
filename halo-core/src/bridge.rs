//! Display bridge
//!
//! Owns the panel controller, touch sensor, timebase and UI toolkit
//! handle, wires them together once at bring-up and drives the toolkit's
//! work queue on every [`DisplayBridge::update`] call. All hardware access
//! is synchronous and happens inside the caller's stack frame.

use alloc::boxed::Box;
use alloc::vec;

use crate::flush::flush_area;
use crate::traits::{DisplayPanel, PanelError, TickSource, TouchSensor};
use crate::ui::{Area, FlushDone, PointerEvent, RefreshMode, UiPlatform, UiToolkit};

/// Solid fill painted right after controller bring-up, as a visible
/// confirmation that the panel accepts pixel data (RGB565 blue)
const BOOT_FILL: u16 = 0x001F;

/// Bridge between the UI toolkit and the display/touch hardware
///
/// Created once at startup and never torn down. Every public operation is
/// a guarded no-op until [`init`](DisplayBridge::init) succeeds; there is
/// no retry path - a failed bring-up leaves the bridge permanently inert
/// and recovery (typically a reboot) is the embedding application's job.
pub struct DisplayBridge<P, T, C, U> {
    panel: P,
    touch: T,
    clock: C,
    toolkit: U,
    /// Working buffer the toolkit composites into; allocated during init
    /// once the panel geometry is known
    frame: Option<Box<[u16]>>,
    width: u16,
    height: u16,
    initialized: bool,
}

impl<P, T, C, U> DisplayBridge<P, T, C, U>
where
    P: DisplayPanel,
    T: TouchSensor,
    C: TickSource,
    U: UiToolkit,
{
    /// Create the bridge; no hardware is touched until
    /// [`init`](DisplayBridge::init)
    pub fn new(panel: P, touch: T, clock: C, toolkit: U) -> Self {
        Self {
            panel,
            touch,
            clock,
            toolkit,
            frame: None,
            width: 0,
            height: 0,
            initialized: false,
        }
    }

    /// One-shot hardware and toolkit bring-up
    ///
    /// Call exactly once. A second call re-runs the full bring-up
    /// sequence against already-configured hardware; nothing guards
    /// against that.
    ///
    /// On error the bridge stays uninitialized and every other operation
    /// remains a no-op. The `Result` exists so the embedding firmware can
    /// log what went wrong; there is nothing else to do with it.
    pub fn init(&mut self) -> Result<(), PanelError> {
        self.panel.begin()?;
        self.panel.fill_screen(BOOT_FILL)?;

        self.toolkit.init();

        let width = self.panel.width();
        let height = self.panel.height();
        if width == 0 || height == 0 {
            return Err(PanelError::NotReady);
        }

        let frame = vec![0u16; width as usize * height as usize].into_boxed_slice();
        self.toolkit
            .create_display(width, height, frame.len(), RefreshMode::Partial);

        // Touch bring-up failure is not fatal: the panel keeps rendering,
        // the pointer just stays released.
        let _ = self.touch.init();
        self.toolkit.create_pointer();

        self.width = width;
        self.height = height;
        self.frame = Some(frame);

        // The gate every other method checks; must flip last.
        self.initialized = true;
        Ok(())
    }

    /// Periodic work entry point
    ///
    /// Refreshes the cached touch sample, then runs the toolkit's due
    /// timers and compositing. Dirty rectangles flush to the panel
    /// synchronously before this returns, so the call blocks for the
    /// duration of all bus writes it triggers.
    pub fn update(&mut self) {
        if !self.initialized {
            return;
        }

        // A glitched bus read keeps the previous sample; input degrades
        // for one cycle, rendering continues.
        let _ = self.touch.update();

        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        let mut platform = PlatformView {
            panel: Some(&mut self.panel),
            touch: &self.touch,
            clock: &self.clock,
        };
        self.toolkit.process(frame, &mut platform);
    }

    /// Reserved full-frame sync hook
    ///
    /// Pixel transfer happens per dirty rectangle in the toolkit flush
    /// path; no distinct full-panel operation exists yet.
    pub fn flush(&mut self) {
        if !self.initialized {
            return;
        }
        // Intentionally empty beyond the gate.
    }

    /// Set panel brightness from a normalized value
    ///
    /// Input is clamped to `[0.0, 1.0]` and scaled to the controller's
    /// 8-bit register with truncating rounding. Fire-and-forget: a failed
    /// bus write is not surfaced.
    pub fn set_brightness(&mut self, brightness: f32) {
        if !self.initialized {
            return;
        }
        let _ = self.panel.set_brightness(brightness_level(brightness));
    }

    /// Whether bring-up completed successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Panel geometry queried during init; (0, 0) before then
    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

/// Scale a normalized brightness to the 8-bit hardware range
///
/// Truncates rather than rounds: 0.5 maps to 127.
fn brightness_level(normalized: f32) -> u8 {
    (normalized.clamp(0.0, 1.0) * 255.0) as u8
}

/// Borrowed view of bridge state handed to the toolkit during
/// [`UiToolkit::process`]
///
/// The panel is optional so the flush path can degrade to a completion-
/// only no-op if the handle is ever absent; with a successfully
/// initialized bridge that path is unreachable.
struct PlatformView<'a, P, T, C> {
    panel: Option<&'a mut P>,
    touch: &'a T,
    clock: &'a C,
}

impl<P, T, C> UiPlatform for PlatformView<'_, P, T, C>
where
    P: DisplayPanel,
    T: TouchSensor,
    C: TickSource,
{
    fn tick_ms(&mut self) -> u32 {
        self.clock.now_ms()
    }

    fn read_pointer(&mut self) -> PointerEvent {
        let sample = self.touch.get_touch_data();
        if sample.pressed {
            PointerEvent::Pressed {
                x: sample.x,
                y: sample.y,
            }
        } else {
            PointerEvent::Released
        }
    }

    fn flush(&mut self, area: &Area, px_map: &[u16], done: FlushDone<'_>) {
        if let Some(panel) = self.panel.as_deref_mut() {
            // The toolkit has no use for a transfer error; a failed write
            // leaves stale pixels on that region until the next flush.
            let _ = flush_area(panel, area, px_map);
        }
        done.complete();
    }
}
