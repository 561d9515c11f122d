//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in halo-core for the display and input hardware:
//!
//! - Panel controllers (CO5300 AMOLED)
//! - Touch controllers (CST816S capacitive)
//!
//! Drivers speak `embedded-hal` 1.0 bus traits, so they run on any chip
//! with a HAL providing `SpiDevice`/`I2c` plus a reset pin and a delay.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod panel;
pub mod touch;

pub use panel::co5300::{Co5300, Co5300Config, ColorOrder, Rotation};
pub use touch::cst816s::{Cst816s, CST816S_ADDR};
