use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::geometry::multipoint::merge_bounds;
use crate::geometry::Polygon;

/// A list of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    coord_type: CoordinateType,
}

impl MultiPolygon {
    /// A multi polygon over `polygons`.
    pub fn new(polygons: Vec<Polygon>, coord_type: CoordinateType) -> Self {
        Self {
            polygons,
            coord_type,
        }
    }

    /// An empty multi polygon of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self::new(Vec::new(), coord_type)
    }

    /// The member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether every member is empty.
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// The merged bounds of all members, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        merge_bounds(self.polygons.iter().map(Polygon::bounds))
    }

    /// Per-member tolerant 2D comparison, order-sensitive.
    pub fn equals_2d(&self, other: &MultiPolygon, tolerance: f64) -> bool {
        self.polygons.len() == other.polygons.len()
            && self
                .polygons
                .iter()
                .zip(&other.polygons)
                .all(|(a, b)| a.equals_2d(b, tolerance))
    }

    /// Per-member tolerant 3D comparison, order-sensitive.
    pub fn equals_3d(
        &self,
        other: &MultiPolygon,
        tolerance_horiz: f64,
        tolerance_vert: f64,
    ) -> bool {
        self.polygons.len() == other.polygons.len()
            && self
                .polygons
                .iter()
                .zip(&other.polygons)
                .all(|(a, b)| a.equals_3d(b, tolerance_horiz, tolerance_vert))
    }
}
