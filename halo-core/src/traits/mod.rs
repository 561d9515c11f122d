//! Hardware abstraction traits
//!
//! These traits define the interface between the bridge logic and
//! hardware-specific driver implementations.

pub mod display;
pub mod time;
pub mod touch;

pub use display::{DisplayPanel, PanelError};
pub use time::TickSource;
pub use touch::{TouchData, TouchError, TouchSensor};
