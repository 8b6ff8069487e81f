//! Output encoders (SVG).

mod svg;

pub use svg::{SvgElement, SvgEncoder};
