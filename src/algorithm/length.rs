use crate::geometry::Geometry;
use crate::position::Position;
use crate::series::PositionSeries;

/// The 2D length of an open chain: the sum of its segment lengths.
pub fn length_2d(chain: &PositionSeries) -> f64 {
    let positions: Vec<Position> = chain.positions().collect();
    positions
        .windows(2)
        .map(|pair| segment_length(&pair[0], &pair[1]))
        .sum()
}

/// The 2D perimeter of a ring, closing an open ring implicitly.
pub fn ring_length_2d(ring: &PositionSeries) -> f64 {
    let positions: Vec<Position> = ring.positions().collect();
    let n = positions.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| segment_length(&positions[i], &positions[(i + 1) % n]))
        .sum()
}

/// The total 2D length of any geometry: chain lengths for linear
/// variants, ring perimeters for areal ones, zero for punctual ones.
pub fn geometry_length_2d(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::LineString(g) => length_2d(g.chain()),
        Geometry::MultiLineString(g) => {
            g.line_strings().iter().map(|line| length_2d(line.chain())).sum()
        }
        Geometry::Polygon(g) => g.rings().iter().map(ring_length_2d).sum(),
        Geometry::MultiPolygon(g) => g
            .polygons()
            .iter()
            .flat_map(|polygon| polygon.rings())
            .map(ring_length_2d)
            .sum(),
        Geometry::GeometryCollection(g) => g.geometries().iter().map(geometry_length_2d).sum(),
    }
}

fn segment_length(a: &Position, b: &Position) -> f64 {
    (b.x() - a.x()).hypot(b.y() - a.y())
}
