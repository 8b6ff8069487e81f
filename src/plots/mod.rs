//! High-level plot types.
//!
//! Provides ready-to-use visualization types with builder APIs.

mod area;

pub use area::{AreaChart, ContainerElement};
