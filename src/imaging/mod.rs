//! Pixel classification and porosity measurement
//!
//! Both operations are pure: the classifier turns a decoded source raster into
//! a black/white image for one threshold, and the meter reduces that binary
//! image to the percentage of black pixels.

pub mod classifier;
pub mod porosity;

use image::{ImageBuffer, Rgba};

/// 16-bit RGBA raster, the in-memory form of every source image
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

pub use classifier::{classify, is_black, normalized_blue};
pub use porosity::{measure, PorosityCounts};
