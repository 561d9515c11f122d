//! Board-agnostic UI bridge logic for Halo display firmware
//!
//! This crate connects a retained-mode UI toolkit to display and touch
//! hardware without depending on any specific chip:
//!
//! - Hardware abstraction traits (panel controller, touch sensor, timebase)
//! - The dirty-rectangle flush adapter (stride stripping, transaction
//!   batching)
//! - The display bridge that owns the hardware handles and drives the
//!   toolkit's work queue
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  UI toolkit (retained-mode, external)   │
//! └─────────────────────────────────────────┘
//!        │ UiToolkit / UiPlatform
//!        ▼
//! ┌─────────────────────────────────────────┐
//! │  halo-core (this crate - bridge logic)  │
//! └─────────────────────────────────────────┘
//!        │ DisplayPanel / TouchSensor / TickSource
//!        ▼
//! ┌─────────────────────────────────────────┐
//! │  halo-drivers (CO5300, CST816S, ...)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Execution is single-threaded and synchronous: the embedding firmware
//! calls [`DisplayBridge::update`] periodically, and all bus writes for
//! dirty rectangles happen inside that call before it returns.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod bridge;
pub mod flush;
pub mod traits;
pub mod ui;

// Re-export key types at crate root for convenience
pub use bridge::DisplayBridge;
pub use flush::{flush_area, padded_stride_pixels, STRIDE_ALIGN_BYTES};
pub use traits::{DisplayPanel, PanelError, TickSource, TouchData, TouchError, TouchSensor};
pub use ui::{Area, FlushDone, PointerEvent, RefreshMode, UiPlatform, UiToolkit};
