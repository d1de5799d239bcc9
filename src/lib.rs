//! Geospatial positions, bounding boxes and multi-part geometries with
//! variable dimensionality (2D, 3D, measured, or both), the WKB/EWKB and
//! WKT/EWKT codecs over them, and a family of planar algorithms.
//!
//! The model is value-oriented: every entity is immutable once built,
//! "mutating" operations return new values, and large coordinate runs
//! can be viewed zero-copy over externally produced flat buffers. All of
//! it is therefore trivially safe to share across threads for reads.
//!
//! ```
//! use geopos::io::wkt::parse_wkt;
//! use geopos::io::wkb::{read_wkb, to_wkb, WkbOptions};
//!
//! let geometry = parse_wkt("POINT Z (1 2 3)").unwrap();
//! let buf = to_wkb(&geometry, &WkbOptions::default()).unwrap();
//! assert_eq!(read_wkb(&buf).unwrap(), geometry);
//! ```

#![warn(missing_docs)]

pub mod algorithm;
mod bbox;
mod coord_type;
mod eq;
mod error;
mod geometry;
pub mod io;
mod position;
mod series;

#[cfg(test)]
pub(crate) mod test;

pub use bbox::{Alignment, BoundingBox};
pub use coord_type::CoordinateType;
pub use error::{GeoposError, GeoposResult};
pub use geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
pub use position::Position;
pub use series::PositionSeries;
