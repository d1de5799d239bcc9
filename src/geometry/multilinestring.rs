use crate::bbox::BoundingBox;
use crate::coord_type::CoordinateType;
use crate::geometry::multipoint::merge_bounds;
use crate::geometry::LineString;

/// A list of line strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
    coord_type: CoordinateType,
}

impl MultiLineString {
    /// A multi line string over `line_strings`.
    pub fn new(line_strings: Vec<LineString>, coord_type: CoordinateType) -> Self {
        Self {
            line_strings,
            coord_type,
        }
    }

    /// An empty multi line string of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self::new(Vec::new(), coord_type)
    }

    /// The member line strings.
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    /// The coordinate type, meaningful even when empty.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Whether every member is empty.
    pub fn is_empty(&self) -> bool {
        self.line_strings.iter().all(LineString::is_empty)
    }

    /// The merged bounds of all members, or `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        merge_bounds(self.line_strings.iter().map(LineString::bounds))
    }

    /// Per-member tolerant 2D comparison, order-sensitive.
    pub fn equals_2d(&self, other: &MultiLineString, tolerance: f64) -> bool {
        self.line_strings.len() == other.line_strings.len()
            && self
                .line_strings
                .iter()
                .zip(&other.line_strings)
                .all(|(a, b)| a.equals_2d(b, tolerance))
    }

    /// Per-member tolerant 3D comparison, order-sensitive.
    pub fn equals_3d(
        &self,
        other: &MultiLineString,
        tolerance_horiz: f64,
        tolerance_vert: f64,
    ) -> bool {
        self.line_strings.len() == other.line_strings.len()
            && self
                .line_strings
                .iter()
                .zip(&other.line_strings)
                .all(|(a, b)| a.equals_3d(b, tolerance_horiz, tolerance_vert))
    }
}
