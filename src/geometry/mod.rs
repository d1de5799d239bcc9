//! Geometry variants composed from positions and position series.
//!
//! Each variant is a thin immutable wrapper: a [`Point`] holds one
//! optional position, a [`LineString`] one series, a [`Polygon`] a list
//! of rings, the `Multi*` types lists of their singular variant, and
//! [`GeometryCollection`] a heterogeneous list. Emptiness is first-class:
//! an empty geometry still carries a [`CoordinateType`].

mod collection;
mod linestring;
mod multilinestring;
mod multipoint;
mod multipolygon;
mod point;
mod polygon;

pub use collection::GeometryCollection;
pub use linestring::LineString;
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;

/// Any of the seven geometry variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single optional position.
    Point(Point),
    /// A chain of positions.
    LineString(LineString),
    /// An exterior ring and zero or more holes.
    Polygon(Polygon),
    /// A list of points.
    MultiPoint(MultiPoint),
    /// A list of line strings.
    MultiLineString(MultiLineString),
    /// A list of polygons.
    MultiPolygon(MultiPolygon),
    /// A heterogeneous list of geometries.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The coordinate type of this geometry.
    pub fn coord_type(&self) -> CoordinateType {
        match self {
            Geometry::Point(g) => g.coord_type(),
            Geometry::LineString(g) => g.coord_type(),
            Geometry::Polygon(g) => g.coord_type(),
            Geometry::MultiPoint(g) => g.coord_type(),
            Geometry::MultiLineString(g) => g.coord_type(),
            Geometry::MultiPolygon(g) => g.coord_type(),
            Geometry::GeometryCollection(g) => g.coord_type(),
        }
    }

    /// Whether this geometry contains no positions at any depth.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// The bounding box over all child bounds, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            Geometry::Point(g) => g.bounds(),
            Geometry::LineString(g) => g.bounds(),
            Geometry::Polygon(g) => g.bounds(),
            Geometry::MultiPoint(g) => g.bounds(),
            Geometry::MultiLineString(g) => g.bounds(),
            Geometry::MultiPolygon(g) => g.bounds(),
            Geometry::GeometryCollection(g) => g.bounds(),
        }
    }

    /// The WKT keyword for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// Tolerant 2D comparison; geometries of different variants are
    /// never equal.
    pub fn equals_2d(&self, other: &Geometry, tolerance: f64) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a.equals_2d(b, tolerance),
            (Geometry::LineString(a), Geometry::LineString(b)) => a.equals_2d(b, tolerance),
            (Geometry::Polygon(a), Geometry::Polygon(b)) => a.equals_2d(b, tolerance),
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => a.equals_2d(b, tolerance),
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                a.equals_2d(b, tolerance)
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => a.equals_2d(b, tolerance),
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                a.equals_2d(b, tolerance)
            }
            _ => false,
        }
    }

    /// Tolerant 3D comparison; geometries of different variants are
    /// never equal, nor are geometries that are not both 3D.
    pub fn equals_3d(&self, other: &Geometry, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::LineString(a), Geometry::LineString(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::Polygon(a), Geometry::Polygon(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                a.equals_3d(b, tolerance_horiz, tolerance_vert)
            }
            _ => false,
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}
