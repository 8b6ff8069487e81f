//! # Trueno-Area
//!
//! Area chart geometry for data visualization.
//!
//! Given heterogeneous plotting inputs (explicit points, parallel x/y arrays,
//! functions of x, or a mix of these), trueno-area normalizes them into
//! labelled numeric series, infers padded domains and pixel ranges, binds
//! per-axis scales and produces stacked or unstacked SVG area paths.
//!
//! ## Features
//!
//! - **Pure Rust**: no JavaScript, HTML, or browser dependencies
//! - **Categorical axes**: string values map to stable `1..N` indices
//! - **Pluggable scales**: linear, log, pow, time, identity, ordinal, threshold
//! - **d3-compatible interpolation**: linear, step, basis, cardinal, monotone and more
//! - **SVG output**: standalone documents or embeddable groups
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trueno_area::prelude::*;
//!
//! let chart = AreaChart::new()
//!     .y(YInput::function(|x| x * x))
//!     .interpolation(Interpolation::Monotone)
//!     .build()?;
//!
//! let geometry = chart.geometry()?;
//! assert_eq!(geometry.series[0].data.len(), 51);
//!
//! chart.to_svg()?;
//! ```
//!
//! ## Pipeline
//!
//! Each call to [`plots::AreaChart::geometry`] runs [`pipeline::compute`]:
//! string mapping, consolidation, domain and range calculation, scale
//! binding and path generation. Nothing is cached between calls.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and CSS color parsing.
pub mod color;

/// Geometric primitives.
pub mod geometry;

/// Input data model: values, points, series and attributes.
pub mod data;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

/// Line interpolation modes and path generation.
pub mod interpolate;

/// Chart style configuration.
pub mod config;

// ============================================================================
// Visualization Modules
// ============================================================================

/// The area chart computation pipeline.
pub mod pipeline;

/// High-level plot types.
pub mod plots;

/// Output encoders (SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-area operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use trueno_area::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::AreaStyle;
    pub use crate::data::{
        AttributeOverrides, AttributeSpec, Axis, AxisPair, AxisSpec, DataInput, DataPoint,
        DataValue, Datum, Series, XInput, YElement, YInput,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::Point;
    pub use crate::interpolate::Interpolation;
    pub use crate::output::SvgEncoder;
    pub use crate::pipeline::{AreaElement, AreaGeometry, AreaPath, DomainWarning};
    pub use crate::plots::{AreaChart, ContainerElement};
    pub use crate::scale::{
        AxisScales, IdentityScale, LinearScale, LogScale, OrdinalScale, PowScale, Scale,
        ThresholdScale, TimeScale,
    };
    pub use batuta_common::display::WithDimensions;
}
