//! Display panel controller drivers

pub mod co5300;
