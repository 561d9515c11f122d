//! CST816S Capacitive Touch Driver
//!
//! Single-point capacitive touch controller common on round watch
//! panels, spoken to over I2C. The chip only reports while a finger is
//! down; the driver keeps the last reading cached so pointer polls never
//! hit the bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use halo_core::traits::{TouchData, TouchError, TouchSensor};

/// Fixed I2C address of the CST816S
pub const CST816S_ADDR: u8 = 0x15;

/// CST816S registers
#[allow(dead_code)]
mod reg {
    pub const GESTURE: u8 = 0x01;
    pub const FINGER_NUM: u8 = 0x02;
    pub const XPOS_H: u8 = 0x03;
    pub const XPOS_L: u8 = 0x04;
    pub const YPOS_H: u8 = 0x05;
    pub const YPOS_L: u8 = 0x06;
    pub const CHIP_ID: u8 = 0xA7;
}

/// CST816S touch driver
pub struct Cst816s<I2C, RST, D> {
    i2c: I2C,
    rst: RST,
    delay: D,
    address: u8,
    sample: TouchData,
}

impl<I2C, RST, D> Cst816s<I2C, RST, D>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a new driver at the standard address
    pub fn new(i2c: I2C, rst: RST, delay: D) -> Self {
        Self {
            i2c,
            rst,
            delay,
            address: CST816S_ADDR,
            sample: TouchData::default(),
        }
    }
}

impl<I2C, RST, D> TouchSensor for Cst816s<I2C, RST, D>
where
    I2C: I2c,
    RST: OutputPin,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), TouchError> {
        // Reset pulse, then give the controller time to boot before the
        // first transaction.
        self.rst.set_low().map_err(|_| TouchError::Bus)?;
        self.delay.delay_ms(20);
        self.rst.set_high().map_err(|_| TouchError::Bus)?;
        self.delay.delay_ms(100);

        // Presence probe. The id byte differs across CST816 variants;
        // answering at all is what matters here.
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg::CHIP_ID], &mut id)
            .map_err(|_| TouchError::NotPresent)?;

        Ok(())
    }

    fn update(&mut self) -> Result<(), TouchError> {
        // One burst read covering gesture, finger count and both
        // 12-bit coordinates.
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::GESTURE], &mut buf)
            .map_err(|_| TouchError::Bus)?;

        let fingers = buf[1];
        if fingers > 0 {
            self.sample = TouchData {
                pressed: true,
                x: u16::from(buf[2] & 0x0F) << 8 | u16::from(buf[3]),
                y: u16::from(buf[4] & 0x0F) << 8 | u16::from(buf[5]),
            };
        } else {
            // Keep the last position; only the pressed flag matters to
            // consumers once the finger lifts.
            self.sample.pressed = false;
        }
        Ok(())
    }

    fn get_touch_data(&self) -> TouchData {
        self.sample
    }
}
