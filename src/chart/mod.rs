//! Pie chart rendering.
//!
//! Category counts are laid out into wedges by [`PieChart::new`] and drawn
//! as an SVG document with the `svg` crate.

mod pie;
mod render;

pub use pie::{
    capitalize, pie, PieChart, PieData, PieOptions, Slice, Wedge, EXPLODE_OFFSET, OTHER_LABEL,
    START_ANGLE,
};
pub use render::render_pie;
