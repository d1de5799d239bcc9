use crate::geometry::Polygon;
use crate::position::Position;
use crate::series::PositionSeries;

/// Crossing-number containment test against a single ring.
///
/// The ring may be given open or explicitly closed; the wrap edge is
/// always considered and a duplicated closing position contributes a
/// degenerate edge that never crosses. Each edge spans the half-open
/// y interval `(min(y), max(y)]` and crossings are counted strictly left
/// of the point, so a point exactly on a shared boundary is counted for
/// exactly one of the two adjacent rings, never both.
pub fn point_in_ring(position: &Position, ring: &PositionSeries) -> bool {
    let positions: Vec<Position> = ring.positions().collect();
    let n = positions.len();
    if n < 3 {
        return false;
    }
    let (px, py) = (position.x(), position.y());
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (positions[i].x(), positions[i].y());
        let (xj, yj) = (positions[j].x(), positions[j].y());
        if (yi > py) != (yj > py) {
            let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Whether `position` lies inside `polygon`: containment in the
/// exterior ring XOR containment in each hole, so a point inside a hole
/// is outside the polygon and a point inside an island-in-a-hole (were
/// one modeled as a further ring) flips back in.
pub fn polygon_contains(polygon: &Polygon, position: &Position) -> bool {
    let mut inside = false;
    for ring in polygon.rings() {
        inside ^= point_in_ring(position, ring);
    }
    inside
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord_type::CoordinateType;

    fn holed_polygon() -> Polygon {
        let exterior =
            PositionSeries::parse("35,10,45,45,15,40,10,20,35,10", CoordinateType::XY).unwrap();
        let hole = PositionSeries::parse("20,30,35,35,30,20,20,30", CoordinateType::XY).unwrap();
        Polygon::new(vec![exterior, hole], CoordinateType::XY).unwrap()
    }

    #[test]
    fn hole_boundary_edge_policy() {
        let polygon = holed_polygon();
        // Just off the hole vertex: inside the polygon.
        assert!(polygon_contains(&polygon, &Position::xy(20.0, 30.0000001)));
        // Exactly on the hole vertex: counted inside the hole, so
        // outside the polygon.
        assert!(!polygon_contains(&polygon, &Position::xy(20.0, 30.0)));
    }

    #[test]
    fn basic_containment() {
        let polygon = holed_polygon();
        assert!(polygon_contains(&polygon, &Position::xy(20.0, 35.0)));
        assert!(!polygon_contains(&polygon, &Position::xy(0.0, 0.0)));
        // Inside the hole.
        assert!(!polygon_contains(&polygon, &Position::xy(28.0, 28.0)));
    }

    #[test]
    fn open_and_closed_rings_agree() {
        let open = PositionSeries::parse("0,0,4,0,4,4,0,4", CoordinateType::XY).unwrap();
        let closed = PositionSeries::parse("0,0,4,0,4,4,0,4,0,0", CoordinateType::XY).unwrap();
        for (x, y, expected) in [
            (2.0, 2.0, true),
            (5.0, 2.0, false),
            (-1.0, 2.0, false),
        ] {
            let position = Position::xy(x, y);
            assert_eq!(point_in_ring(&position, &open), expected, "open ({x}, {y})");
            assert_eq!(
                point_in_ring(&position, &closed),
                expected,
                "closed ({x}, {y})"
            );
        }
    }
}
