use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::geometry::multipoint::merge_bounds;
use crate::geometry::Geometry;

/// A heterogeneous list of geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    coord_type: CoordinateType,
}

impl GeometryCollection {
    /// A collection over `geometries`. Members keep their own coordinate
    /// types; `coord_type` is what the collection itself declares.
    pub fn new(geometries: Vec<Geometry>, coord_type: CoordinateType) -> Self {
        Self {
            geometries,
            coord_type,
        }
    }

    /// An empty collection of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self::new(Vec::new(), coord_type)
    }

    /// The member geometries.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// The coordinate type the collection declares.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether every member is empty.
    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(Geometry::is_empty)
    }

    /// The merged bounds of all members, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        merge_bounds(self.geometries.iter().map(Geometry::bounds))
    }

    /// Per-member tolerant 2D comparison, order-sensitive.
    pub fn equals_2d(&self, other: &GeometryCollection, tolerance: f64) -> bool {
        self.geometries.len() == other.geometries.len()
            && self
                .geometries
                .iter()
                .zip(&other.geometries)
                .all(|(a, b)| a.equals_2d(b, tolerance))
    }

    /// Per-member tolerant 3D comparison, order-sensitive.
    pub fn equals_3d(
        &self,
        other: &GeometryCollection,
        tolerance_horiz: f64,
        tolerance_vert: f64,
    ) -> bool {
        self.geometries.len() == other.geometries.len()
            && self
                .geometries
                .iter()
                .zip(&other.geometries)
                .all(|(a, b)| a.equals_3d(b, tolerance_horiz, tolerance_vert))
    }
}
