//! tinct core primitives
//!
//! Color representation and the fixed bits of color arithmetic the theming
//! engine derives values with (perceived luminance, darkening, interpolation).

pub mod color;

pub use color::{Color, DARKEN_FACTOR, LIGHTNESS_THRESHOLD};
