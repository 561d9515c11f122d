//! Touch sensor trait
//!
//! Stateful sampling model: [`TouchSensor::update`] refreshes an internal
//! cache from hardware, [`TouchSensor::get_touch_data`] returns that cache
//! without touching the bus. The split exists because the UI toolkit polls
//! pointer state from a context that must never block on I/O.

/// Errors that can occur with the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Communication error on the underlying bus
    Bus,
    /// Controller did not respond during bring-up
    NotPresent,
}

/// One touch sample
///
/// `x`/`y` are only meaningful while `pressed` is true; a released sample
/// carries whatever coordinates the controller last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchData {
    /// A finger is currently on the panel
    pub pressed: bool,
    /// Horizontal position in panel pixels
    pub x: u16,
    /// Vertical position in panel pixels
    pub y: u16,
}

/// Capacitive touch controller
pub trait TouchSensor {
    /// Bring up the controller (reset sequence, presence check)
    fn init(&mut self) -> Result<(), TouchError>;

    /// Refresh the cached sample from hardware
    fn update(&mut self) -> Result<(), TouchError>;

    /// Latest cached sample; never performs bus I/O
    fn get_touch_data(&self) -> TouchData;
}
