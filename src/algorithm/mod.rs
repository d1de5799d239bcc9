//! Planar geometry algorithms over positions and series.
//!
//! Everything here works on the first two coordinate components; z and m
//! ride along untouched. Results are materialized XY positions.

mod area;
mod centroid;
mod length;
mod point_in_polygon;
mod polylabel;

pub use area::{area, polygon_area, signed_area};
pub use centroid::{centroid, centroid_of_series, Dimensionality};
pub use length::{geometry_length_2d, length_2d, ring_length_2d};
pub use point_in_polygon::{point_in_ring, polygon_contains};
pub use polylabel::polylabel;
