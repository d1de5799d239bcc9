use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::position::Position;

/// A single optional position.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    position: Option<Position>,
    coord_type: CoordinateType,
}

impl Point {
    /// A point at `position`.
    pub fn new(position: Position) -> Self {
        let coord_type = position.coord_type();
        Self {
            position: Some(position),
            coord_type,
        }
    }

    /// An empty point of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self {
            position: None,
            coord_type,
        }
    }

    /// The position, or `None` when empty.
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether this point has no position.
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
    }

    /// A degenerate box at the position, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let pos = self.position.as_ref()?;
        Some(BoundingBox::new(pos.clone(), pos.clone()))
    }

    /// Tolerant 2D comparison. Two empty points are equal; an empty
    /// point never equals a non-empty one.
    pub fn equals_2d(&self, other: &Point, tolerance: f64) -> bool {
        match (&self.position, &other.position) {
            (Some(a), Some(b)) => a.equals_2d(b, tolerance),
            (None, None) => true,
            _ => false,
        }
    }

    /// Tolerant 3D comparison; see [`Position::equals_3d`].
    pub fn equals_3d(&self, other: &Point, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        match (&self.position, &other.position) {
            (Some(a), Some(b)) => a.equals_3d(b, tolerance_horiz, tolerance_vert),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_point_keeps_its_type() {
        let point = Point::empty(CoordinateType::XYZM);
        assert!(point.is_empty());
        assert_eq!(point.coord_type(), CoordinateType::XYZM);
        assert_eq!(point.bounds(), None);
    }

    #[test]
    fn bounds_are_degenerate() {
        let point = Point::new(Position::xy(3.0, 4.0));
        let bounds = point.bounds().unwrap();
        assert_eq!(bounds.min(), bounds.max());
        assert_eq!(bounds.corners_2d().len(), 1);
    }
}
