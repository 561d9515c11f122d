//! CO5300 AMOLED Panel Driver
//!
//! Driver for CO5300-based round AMOLED panels (typically 466x466,
//! RGB565) over SPI. Every write on the wire is framed as
//! `0x02, CMD, DATA...`; chip-select scoping is left to the `SpiDevice`
//! implementation. Brightness is the panel's own emission level via the
//! DCS display-brightness register, no backlight pin involved.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use halo_core::traits::{DisplayPanel, PanelError};

/// Write framing prefix expected by the controller in serial mode
const WRITE_PREFIX: u8 = 0x02;

/// Pixels staged per SPI transaction when streaming RAM writes
const STAGE_PIXELS: usize = 128;

/// CO5300 commands (MIPI DCS plus vendor extensions)
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const RAMWRC: u8 = 0x3C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const WRDISBV: u8 = 0x51;
    pub const WRCTRLD: u8 = 0x53;
    pub const SPIMODE: u8 = 0xC4;
    pub const SETHBM: u8 = 0x63;
}

/// Color channel order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// Red in the high bits (default)
    #[default]
    Rgb,
    /// Blue in the high bits
    Bgr,
}

/// Panel rotation in 90-degree steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Panel geometry and orientation configuration
///
/// Width/height are given in the rotated frame the caller renders in.
/// Offsets compensate for panels whose active area does not start at RAM
/// column/row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Co5300Config {
    /// Active width in pixels
    pub width: u16,
    /// Active height in pixels
    pub height: u16,
    /// RAM column offset of the first visible pixel
    pub x_offset: u16,
    /// RAM row offset of the first visible pixel
    pub y_offset: u16,
    /// Rotation applied via MADCTL
    pub rotation: Rotation,
    /// Color channel order
    pub color_order: ColorOrder,
    /// Mirror the X axis (for IPS stacks mounted flipped)
    pub invert_x: bool,
    /// Mirror the Y axis
    pub invert_y: bool,
}

impl Co5300Config {
    /// Configuration with the RAM offset of the common 1.43" module;
    /// adjust fields for other panel stacks
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            x_offset: 6,
            y_offset: 0,
            rotation: Rotation::Deg0,
            color_order: ColorOrder::Rgb,
            invert_x: false,
            invert_y: false,
        }
    }

    /// MADCTL value for this orientation
    fn madctl(&self) -> u8 {
        let mut value = match self.rotation {
            Rotation::Deg0 => 0x00,
            Rotation::Deg90 => 0x60,
            Rotation::Deg180 => 0xC0,
            Rotation::Deg270 => 0xA0,
        };
        if self.invert_x {
            value ^= 0x40;
        }
        if self.invert_y {
            value ^= 0x80;
        }
        if matches!(self.color_order, ColorOrder::Bgr) {
            value |= 0x08;
        }
        value
    }
}

/// CO5300 panel driver
pub struct Co5300<SPI, RST, D> {
    spi: SPI,
    rst: RST,
    delay: D,
    config: Co5300Config,
    /// Next pixel write opens a fresh RAM write rather than continuing
    /// the previous one
    ram_armed: bool,
    ready: bool,
}

impl<SPI, RST, D> Co5300<SPI, RST, D>
where
    SPI: SpiDevice,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a new driver; the panel stays in reset until
    /// [`begin`](DisplayPanel::begin)
    pub fn new(spi: SPI, rst: RST, delay: D, config: Co5300Config) -> Self {
        Self {
            spi,
            rst,
            delay,
            config,
            ram_armed: false,
            ready: false,
        }
    }

    /// Hard reset pulse per the panel datasheet timing
    fn hard_reset(&mut self) -> Result<(), PanelError> {
        self.rst.set_high().map_err(|_| PanelError::Bus)?;
        self.delay.delay_ms(2);
        self.rst.set_low().map_err(|_| PanelError::Bus)?;
        self.delay.delay_ms(80);
        self.rst.set_high().map_err(|_| PanelError::Bus)?;
        self.delay.delay_ms(200);
        Ok(())
    }

    /// Send one framed command with its parameters
    fn command(&mut self, command: u8, data: &[u8]) -> Result<(), PanelError> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[WRITE_PREFIX, command]),
                Operation::Write(data),
            ])
            .map_err(|_| PanelError::Bus)
    }
}

impl<SPI, RST, D> DisplayPanel for Co5300<SPI, RST, D>
where
    SPI: SpiDevice,
    RST: OutputPin,
    D: DelayNs,
{
    fn begin(&mut self) -> Result<(), PanelError> {
        self.hard_reset()?;

        self.command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(180);

        self.command(cmd::COLMOD, &[0x55])?; // 16bpp RGB565
        self.command(cmd::SPIMODE, &[0x80])?;
        self.command(cmd::NORON, &[])?;
        self.command(cmd::WRCTRLD, &[0x20])?; // enable brightness control
        self.command(cmd::SETHBM, &[0xFF])?;
        self.command(cmd::WRDISBV, &[0x00])?; // dark until display-on settles
        self.command(cmd::MADCTL, &[self.config.madctl()])?;

        self.command(cmd::DISPON, &[])?;
        self.delay.delay_ms(200);
        self.command(cmd::WRDISBV, &[0xFF])?;

        self.ready = true;
        Ok(())
    }

    fn width(&self) -> u16 {
        self.config.width
    }

    fn height(&self) -> u16 {
        self.config.height
    }

    fn fill_screen(&mut self, color: u16) -> Result<(), PanelError> {
        self.set_addr_window(0, 0, self.config.width, self.config.height)?;

        let stage = [color; STAGE_PIXELS];
        let mut remaining = self.config.width as usize * self.config.height as usize;
        while remaining > 0 {
            let count = remaining.min(STAGE_PIXELS);
            self.write_pixels(&stage[..count])?;
            remaining -= count;
        }
        Ok(())
    }

    fn start_write(&mut self) {
        // Chip-select scoping happens per SPI transaction in the bus
        // layer; the bracket carries no wire traffic on this controller.
    }

    fn end_write(&mut self) {}

    fn set_addr_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), PanelError> {
        if !self.ready {
            return Err(PanelError::NotReady);
        }
        if w == 0 || h == 0 {
            return Err(PanelError::OutOfBounds);
        }

        let x1 = x
            .checked_add(w - 1)
            .filter(|&edge| edge < self.config.width)
            .ok_or(PanelError::OutOfBounds)?;
        let y1 = y
            .checked_add(h - 1)
            .filter(|&edge| edge < self.config.height)
            .ok_or(PanelError::OutOfBounds)?;

        let x0 = x + self.config.x_offset;
        let x1 = x1 + self.config.x_offset;
        let y0 = y + self.config.y_offset;
        let y1 = y1 + self.config.y_offset;

        self.command(
            cmd::CASET,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )?;
        self.command(
            cmd::RASET,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )?;

        self.ram_armed = true;
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), PanelError> {
        if !self.ready {
            return Err(PanelError::NotReady);
        }

        // RGB565 goes out big-endian. Stage in bounded chunks; the first
        // chunk after a window-set opens the RAM write, later chunks
        // continue it.
        let mut stage = [0u8; STAGE_PIXELS * 2];
        for chunk in pixels.chunks(STAGE_PIXELS) {
            for (src, dst) in chunk.iter().zip(stage.chunks_exact_mut(2)) {
                dst.copy_from_slice(&src.to_be_bytes());
            }

            let opcode = if self.ram_armed {
                cmd::RAMWR
            } else {
                cmd::RAMWRC
            };
            self.ram_armed = false;

            self.spi
                .transaction(&mut [
                    Operation::Write(&[WRITE_PREFIX, opcode]),
                    Operation::Write(&stage[..chunk.len() * 2]),
                ])
                .map_err(|_| PanelError::Bus)?;
        }
        Ok(())
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), PanelError> {
        if !self.ready {
            return Err(PanelError::NotReady);
        }
        self.command(cmd::WRDISBV, &[value])
    }
}
