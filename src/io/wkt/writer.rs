use std::fmt::{self, Display, Formatter};

use crate::coord_type::CoordinateType;
use crate::geometry::{Geometry, Point, Polygon};
use crate::position::Position;
use crate::series::PositionSeries;

/// Encode a geometry as canonical WKT: uppercase keywords, a spaced
/// dimension marker (`POINT Z (…)`), `, ` between tuples and children,
/// single spaces inside tuples, `EMPTY` for empty geometries.
pub fn to_wkt(geometry: &Geometry) -> String {
    geometry.to_string()
}

/// Encode a geometry as EWKT with a leading `SRID=<int>;` prefix.
pub fn to_ewkt(geometry: &Geometry, srid: i32) -> String {
    format!("SRID={srid};{geometry}")
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let coord_type = self.coord_type();
        write!(f, "{}{}", self.type_name(), coord_type.wkt_suffix())?;
        if self.is_empty() && !has_structure(self) {
            return write!(f, " EMPTY");
        }
        write!(f, " ")?;
        write_body(f, self)
    }
}

/// An all-empty composite that still has members (e.g. a multi point of
/// empty points) keeps its structure instead of collapsing to `EMPTY`.
fn has_structure(geometry: &Geometry) -> bool {
    match geometry {
        Geometry::Point(_) | Geometry::LineString(_) => false,
        Geometry::Polygon(g) => !g.rings().is_empty(),
        Geometry::MultiPoint(g) => !g.points().is_empty(),
        Geometry::MultiLineString(g) => !g.line_strings().is_empty(),
        Geometry::MultiPolygon(g) => !g.polygons().is_empty(),
        Geometry::GeometryCollection(g) => !g.geometries().is_empty(),
    }
}

fn write_body(f: &mut Formatter<'_>, geometry: &Geometry) -> fmt::Result {
    let coord_type = geometry.coord_type();
    match geometry {
        Geometry::Point(g) => write_point_body(f, g, coord_type),
        Geometry::LineString(g) => write_series_group(f, g.chain(), coord_type),
        Geometry::Polygon(g) => write_polygon_body(f, g, coord_type),
        Geometry::MultiPoint(g) => {
            write_children(f, g.points(), |f, point| {
                write_point_body(f, point, coord_type)
            })
        }
        Geometry::MultiLineString(g) => {
            write_children(f, g.line_strings(), |f, line| {
                if line.is_empty() {
                    write!(f, "EMPTY")
                } else {
                    write_series_group(f, line.chain(), coord_type)
                }
            })
        }
        Geometry::MultiPolygon(g) => {
            write_children(f, g.polygons(), |f, polygon| {
                if polygon.rings().is_empty() {
                    write!(f, "EMPTY")
                } else {
                    write_polygon_body(f, polygon, coord_type)
                }
            })
        }
        Geometry::GeometryCollection(g) => {
            write_children(f, g.geometries(), |f, child| write!(f, "{child}"))
        }
    }
}

fn write_point_body(f: &mut Formatter<'_>, point: &Point, coord_type: CoordinateType) -> fmt::Result {
    match point.position() {
        Some(position) => {
            write!(f, "(")?;
            write_tuple(f, position, coord_type)?;
            write!(f, ")")
        }
        None => write!(f, "EMPTY"),
    }
}

fn write_polygon_body(
    f: &mut Formatter<'_>,
    polygon: &Polygon,
    coord_type: CoordinateType,
) -> fmt::Result {
    write_children(f, polygon.rings(), |f, ring| {
        if ring.is_empty() {
            write!(f, "EMPTY")
        } else {
            write_series_group(f, ring, coord_type)
        }
    })
}

/// `(item, item, …)` with the writer callback per item.
fn write_children<T>(
    f: &mut Formatter<'_>,
    children: &[T],
    mut write_child: impl FnMut(&mut Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_child(f, child)?;
    }
    write!(f, ")")
}

/// `(x y, x y, …)` with every tuple coerced to `coord_type`.
fn write_series_group(
    f: &mut Formatter<'_>,
    series: &PositionSeries,
    coord_type: CoordinateType,
) -> fmt::Result {
    write!(f, "(")?;
    for (i, position) in series.positions().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_tuple(f, &position, coord_type)?;
    }
    write!(f, ")")
}

fn write_tuple(
    f: &mut Formatter<'_>,
    position: &Position,
    coord_type: CoordinateType,
) -> fmt::Result {
    for (n, value) in position.to_coord_type(coord_type).values().enumerate() {
        if n > 0 {
            write!(f, " ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::reader::parse_wkt;
    use crate::test::all_fixtures;

    #[test]
    fn canonical_forms() {
        let cases = [
            ("point( 30  10 )", "POINT (30 10)"),
            ("POINT Z(1 2 3)", "POINT Z (1 2 3)"),
            ("pointzm empty", "POINT ZM EMPTY"),
            ("LINESTRING(0 0,1 1)", "LINESTRING (0 0, 1 1)"),
            (
                "polygon((35 10,45 45,15 40,10 20,35 10),(20 30,35 35,30 20,20 30))",
                "POLYGON ((35 10, 45 45, 15 40, 10 20, 35 10), (20 30, 35 35, 30 20, 20 30))",
            ),
            ("MULTIPOINT(10 40,40 30)", "MULTIPOINT ((10 40), (40 30))"),
            (
                "GEOMETRYCOLLECTION(POINT(1 2),LINESTRING EMPTY)",
                "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING EMPTY)",
            ),
            ("MULTIPOLYGON EMPTY", "MULTIPOLYGON EMPTY"),
        ];
        for (input, expected) in cases {
            assert_eq!(to_wkt(&parse_wkt(input).unwrap()), expected, "{input}");
        }
    }

    #[test]
    fn round_trip_all_fixtures() {
        for geometry in all_fixtures() {
            let text = to_wkt(&geometry);
            let reparsed = parse_wkt(&text).unwrap();
            assert_eq!(reparsed, geometry, "{text}");
            // The canonical form is a fixed point of the codec.
            assert_eq!(to_wkt(&reparsed), text);
        }
    }

    #[test]
    fn ewkt_prefix() {
        let geometry = parse_wkt("POINT (1 2)").unwrap();
        assert_eq!(to_ewkt(&geometry, 4326), "SRID=4326;POINT (1 2)");
    }
}
