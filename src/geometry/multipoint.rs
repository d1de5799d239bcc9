use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::geometry::Point;

/// A list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
    coord_type: CoordinateType,
}

impl MultiPoint {
    /// A multi point over `points`.
    pub fn new(points: Vec<Point>, coord_type: CoordinateType) -> Self {
        Self { points, coord_type }
    }

    /// An empty multi point of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self::new(Vec::new(), coord_type)
    }

    /// The member points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether every member is empty.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Point::is_empty)
    }

    /// The merged bounds of all members, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        merge_bounds(self.points.iter().map(Point::bounds))
    }

    /// Per-member tolerant 2D comparison, order-sensitive.
    pub fn equals_2d(&self, other: &MultiPoint, tolerance: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.equals_2d(b, tolerance))
    }

    /// Per-member tolerant 3D comparison, order-sensitive.
    pub fn equals_3d(&self, other: &MultiPoint, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.equals_3d(b, tolerance_horiz, tolerance_vert))
    }
}

/// Fold optional child bounds into one merged box.
pub(crate) fn merge_bounds(
    bounds: impl Iterator<Item = Option<BoundingBox>>,
) -> Option<BoundingBox> {
    bounds
        .flatten()
        .reduce(|merged, next| merged.merge(&next))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::position::Position;

    #[test]
    fn bounds_skip_empty_members() {
        let multi = MultiPoint::new(
            vec![
                Point::new(Position::xy(1.0, 1.0)),
                Point::empty(CoordinateType::XY),
                Point::new(Position::xy(-2.0, 5.0)),
            ],
            CoordinateType::XY,
        );
        assert_eq!(multi.bounds().unwrap(), BoundingBox::xy(-2.0, 1.0, 1.0, 5.0));
        assert!(!multi.is_empty());
        assert!(MultiPoint::empty(CoordinateType::XY).is_empty());
    }
}
