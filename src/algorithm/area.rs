use crate::geometry::{Geometry, Polygon};
use crate::position::Position;
use crate::series::PositionSeries;

/// The signed shoelace area of a ring.
///
/// Positive for counter-clockwise winding. An open ring (first != last)
/// is closed implicitly by wrapping the last pair back to the first; an
/// explicitly closed ring contributes a zero term for the duplicate, so
/// both forms yield the same value. Correct for self-touching rings.
pub fn signed_area(ring: &PositionSeries) -> f64 {
    let positions: Vec<Position> = ring.positions().collect();
    let n = positions.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = &positions[i];
        let b = &positions[(i + 1) % n];
        sum += a.x() * b.y() - b.x() * a.y();
    }
    sum / 2.0
}

/// The unsigned area of a polygon: the exterior's area minus each
/// hole's, regardless of how the rings are wound.
pub fn polygon_area(polygon: &Polygon) -> f64 {
    let mut rings = polygon.rings().iter();
    let exterior = match rings.next() {
        Some(ring) => signed_area(ring).abs(),
        None => return 0.0,
    };
    exterior - rings.map(|hole| signed_area(hole).abs()).sum::<f64>()
}

/// The unsigned planar area of any geometry. Punctual and linear
/// variants have zero area; collections sum their members.
pub fn area(geometry: &Geometry) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::LineString(_) => 0.0,
        Geometry::MultiPoint(_) | Geometry::MultiLineString(_) => 0.0,
        Geometry::Polygon(g) => polygon_area(g),
        Geometry::MultiPolygon(g) => g.polygons().iter().map(polygon_area).sum(),
        Geometry::GeometryCollection(g) => g.geometries().iter().map(area).sum(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord_type::CoordinateType;

    #[test]
    fn shoelace_with_implicit_closing() {
        let closed =
            PositionSeries::parse("1,6,3,1,7,2,4,4,8,5,1,6", CoordinateType::XY).unwrap();
        assert_eq!(signed_area(&closed), 16.5);

        let open = PositionSeries::parse("1,6,3,1,7,2,4,4,8,5", CoordinateType::XY).unwrap();
        assert_eq!(signed_area(&open), 16.5);
    }

    #[test]
    fn reversal_flips_the_sign() {
        let ring = PositionSeries::parse("1,6,3,1,7,2,4,4,8,5", CoordinateType::XY).unwrap();
        assert_eq!(signed_area(&ring.reversed()), -signed_area(&ring));
    }

    #[test]
    fn degenerate_rings_have_zero_area() {
        let two = PositionSeries::parse("0,0,1,1", CoordinateType::XY).unwrap();
        assert_eq!(signed_area(&two), 0.0);
        let collinear = PositionSeries::parse("0,0,1,1,2,2", CoordinateType::XY).unwrap();
        assert_eq!(signed_area(&collinear), 0.0);
    }

    #[test]
    fn holes_subtract() {
        let exterior =
            PositionSeries::parse("0,0,10,0,10,10,0,10,0,0", CoordinateType::XY).unwrap();
        // Wound the same way as the exterior; the area still subtracts.
        let hole = PositionSeries::parse("1,1,3,1,3,3,1,3,1,1", CoordinateType::XY).unwrap();
        let polygon = Polygon::new(vec![exterior, hole], CoordinateType::XY).unwrap();
        assert_eq!(polygon_area(&polygon), 96.0);
    }
}
