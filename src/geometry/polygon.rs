use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::error::{GeoposError, GeoposResult};
use crate::series::PositionSeries;

/// An exterior ring and zero or more holes.
///
/// Ring 0 is the exterior; every further ring is a hole. Each ring is
/// either empty or has at least 4 positions and is closed in 2D (first
/// equals last); constructing a polygon that violates this fails with an
/// invalid-geometry error naming the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<PositionSeries>,
    coord_type: CoordinateType,
}

impl Polygon {
    /// A polygon over validated rings.
    pub fn new(rings: Vec<PositionSeries>, coord_type: CoordinateType) -> GeoposResult<Self> {
        for (i, ring) in rings.iter().enumerate() {
            if ring.is_empty() {
                continue;
            }
            if ring.len() < 4 {
                return Err(GeoposError::InvalidGeometry(format!(
                    "ring {i} has {} positions, a non-empty ring needs at least 4",
                    ring.len()
                )));
            }
            if !ring.is_closed_2d() {
                return Err(GeoposError::InvalidGeometry(format!(
                    "ring {i} is not closed: first and last positions differ"
                )));
            }
        }
        Ok(Self { rings, coord_type })
    }

    /// An empty polygon of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self {
            rings: Vec::new(),
            coord_type,
        }
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> &[PositionSeries] {
        &self.rings
    }

    /// The exterior ring, or `None` when the polygon is empty.
    pub fn exterior(&self) -> Option<&PositionSeries> {
        self.rings.first()
    }

    /// The hole rings.
    pub fn interiors(&self) -> &[PositionSeries] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether no ring holds a position.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(PositionSeries::is_empty)
    }

    /// The bounding box of the exterior ring, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_series(self.exterior()?)
    }

    /// Per-ring tolerant 2D comparison with matching ring count.
    pub fn equals_2d(&self, other: &Polygon, tolerance: f64) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals_2d(b, tolerance))
    }

    /// Per-ring tolerant 3D comparison with matching ring count.
    pub fn equals_3d(&self, other: &Polygon, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        self.rings.len() == other.rings.len()
            && self
                .rings
                .iter()
                .zip(&other.rings)
                .all(|(a, b)| a.equals_3d(b, tolerance_horiz, tolerance_vert))
    }
}
