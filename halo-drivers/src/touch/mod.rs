//! Touch controller drivers

pub mod cst816s;
