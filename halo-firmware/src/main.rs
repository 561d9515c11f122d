//! Halo demo firmware
//!
//! Brings up a CO5300 round AMOLED with a CST816S touch controller on an
//! RP235x board and drives the display bridge from a periodic ticker.
//! Rendering comes from a small built-in demo scene; swap in a real UI
//! toolkit by providing another `UiToolkit` implementation.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_alloc::LlffHeap as Heap;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use halo_core::{DisplayBridge, TickSource};
use halo_drivers::{Co5300, Co5300Config, Cst816s};

use crate::demo::DemoScene;

mod demo;

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Heap allocator backing the bridge's frame buffer
// (466 * 466 RGB565 pixels is ~425 KiB)
#[global_allocator]
static HEAP: Heap = Heap::empty();

const HEAP_SIZE: usize = 440 * 1024;

/// Panel geometry for the 1.43" round AMOLED module
const PANEL_WIDTH: u16 = 466;
const PANEL_HEIGHT: u16 = 466;

/// Milliseconds since boot, for the toolkit tick counter
struct Uptime;

impl TickSource for Uptime {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Halo firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());

    // Panel on SPI1. The CO5300 is write-only in this wiring; chip
    // select is scoped per transaction by the bus wrapper.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 32_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
    let panel_cs = Output::new(p.PIN_9, Level::High);
    let panel_rst = Output::new(p.PIN_8, Level::High);
    let spi_device = ExclusiveDevice::new_no_delay(spi, panel_cs).unwrap();

    let panel = Co5300::new(
        spi_device,
        panel_rst,
        Delay,
        Co5300Config::new(PANEL_WIDTH, PANEL_HEIGHT),
    );

    // Touch controller on I2C0.
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let touch_rst = Output::new(p.PIN_6, Level::High);
    let touch = Cst816s::new(i2c, touch_rst, Delay);

    let mut bridge = DisplayBridge::new(panel, touch, Uptime, DemoScene::new());

    match bridge.init() {
        Ok(()) => {
            let (width, height) = bridge.dimensions();
            info!("Display bridge up: {}x{}", width, height);
        }
        Err(e) => {
            // Bring-up failure is permanent at this layer; keep the task
            // alive for the debugger, nothing will render.
            error!("Display bring-up failed: {}", e);
        }
    }

    bridge.set_brightness(0.8);

    // Drive the toolkit work queue at 200 Hz. Dirty-rectangle flushes
    // happen synchronously inside update().
    let mut ticker = Ticker::every(Duration::from_millis(5));
    loop {
        bridge.update();
        ticker.next().await;
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
