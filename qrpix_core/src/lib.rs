mod canvas;
mod geometry;
mod validate;

pub use canvas::{Canvas, CanvasParseError, Module};
pub use geometry::{Geometry, PixelBox};
pub use validate::{check_border, check_box_size};
pub use validate::{ConfigError, ConversionError, Dimension, Parameter};
