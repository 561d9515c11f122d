//! Demo scene
//!
//! Minimal retained scene standing in for a full UI toolkit: one colored
//! square drifting across the panel, jumping to wherever a finger lands.
//! Each cycle repaints only the rectangles that changed, rendered at the
//! padded row stride the platform flush contract expects.

use halo_core::{
    padded_stride_pixels, Area, FlushDone, PointerEvent, RefreshMode, UiPlatform, UiToolkit,
};

/// Square edge length; odd on purpose so rows pad and the per-row flush
/// path gets exercised on real hardware
const BOX_SIZE: u16 = 31;

/// Animation step interval
const STEP_MS: u32 = 16;

const BACKGROUND: u16 = 0x0000;
const FOREGROUND: u16 = 0xFD20; // amber

pub struct DemoScene {
    width: u16,
    height: u16,
    box_x: u16,
    box_y: u16,
    dx: i16,
    dy: i16,
    last_step_ms: u32,
    /// Position painted on the previous cycle, pending erase
    prev_box: Option<(u16, u16)>,
    ready: bool,
}

impl DemoScene {
    pub const fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            box_x: 40,
            box_y: 40,
            dx: 2,
            dy: 3,
            last_step_ms: 0,
            prev_box: None,
            ready: false,
        }
    }

    /// Advance the square one animation step, bouncing off the edges
    fn step(&mut self) {
        let max_x = (self.width - BOX_SIZE) as i32;
        let max_y = (self.height - BOX_SIZE) as i32;

        let mut x = self.box_x as i32 + self.dx as i32;
        let mut y = self.box_y as i32 + self.dy as i32;
        if x <= 0 || x >= max_x {
            self.dx = -self.dx;
            x = x.clamp(0, max_x);
        }
        if y <= 0 || y >= max_y {
            self.dy = -self.dy;
            y = y.clamp(0, max_y);
        }
        self.box_x = x as u16;
        self.box_y = y as u16;
    }

    /// Render a solid rectangle into the working buffer at the padded
    /// stride; returns the pixel span to hand to the flush
    fn paint(frame: &mut [u16], area: &Area, color: u16) -> usize {
        let w = area.width as usize;
        let stride = padded_stride_pixels(area.width);
        for row in 0..area.height as usize {
            let start = row * stride;
            for px in frame[start..start + w].iter_mut() {
                *px = color;
            }
        }
        (area.height as usize - 1) * stride + w
    }
}

impl UiToolkit for DemoScene {
    fn init(&mut self) {}

    fn create_display(&mut self, width: u16, height: u16, _buffer_pixels: usize, _mode: RefreshMode) {
        self.width = width;
        self.height = height;
        self.ready = true;
    }

    fn create_pointer(&mut self) {}

    fn process(&mut self, frame: &mut [u16], platform: &mut dyn UiPlatform) {
        if !self.ready {
            return;
        }

        let now = platform.tick_ms();
        if now.wrapping_sub(self.last_step_ms) < STEP_MS {
            return;
        }
        self.last_step_ms = now;

        if let PointerEvent::Pressed { x, y } = platform.read_pointer() {
            self.box_x = x.min(self.width - BOX_SIZE);
            self.box_y = y.min(self.height - BOX_SIZE);
        } else {
            self.step();
        }

        // Erase the old square, then paint the new one. Both transfers
        // complete synchronously inside the flush call.
        if let Some((px, py)) = self.prev_box.take() {
            if (px, py) != (self.box_x, self.box_y) {
                let area = Area::new(px, py, BOX_SIZE, BOX_SIZE);
                let len = Self::paint(frame, &area, BACKGROUND);
                let mut done = false;
                platform.flush(&area, &frame[..len], FlushDone::new(&mut done));
            }
        }

        let area = Area::new(self.box_x, self.box_y, BOX_SIZE, BOX_SIZE);
        let len = Self::paint(frame, &area, FOREGROUND);
        let mut done = false;
        platform.flush(&area, &frame[..len], FlushDone::new(&mut done));
        self.prev_box = Some((self.box_x, self.box_y));
    }
}
