use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::series::PositionSeries;

/// A chain of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    chain: PositionSeries,
}

impl LineString {
    /// A line string over `chain`.
    pub fn new(chain: PositionSeries) -> Self {
        Self { chain }
    }

    /// An empty line string of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self {
            chain: PositionSeries::empty(coord_type),
        }
    }

    /// The chain of positions.
    pub fn chain(&self) -> &PositionSeries {
        &self.chain
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.chain.coord_type()
    }

    /// Whether the chain has no positions.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The bounding box of the chain, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_series(&self.chain)
    }

    /// Per-index tolerant 2D comparison with matching length.
    pub fn equals_2d(&self, other: &LineString, tolerance: f64) -> bool {
        self.chain.equals_2d(&other.chain, tolerance)
    }

    /// Per-index tolerant 3D comparison with matching length.
    pub fn equals_3d(&self, other: &LineString, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        self.chain.equals_3d(&other.chain, tolerance_horiz, tolerance_vert)
    }
}
