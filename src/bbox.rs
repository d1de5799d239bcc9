use std::fmt::Display;

use crate::coord_type::CoordinateType;
use crate::error::{GeoposError, GeoposResult};
use crate::position::{parse_delimited_values, Position};
use crate::series::PositionSeries;

/// A min/max position pair of one coordinate type.
///
/// `min.x <= max.x` is deliberately NOT an invariant: a geographic box
/// crossing the antimeridian is represented with `min.x > max.x`, and
/// every per-axis comparison here accounts for that. A box whose x or y
/// is NaN is *empty*; an empty box intersects nothing.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    min: Position,
    max: Position,
}

impl BoundingBox {
    /// Construct from two positions. `max` is coerced to the coordinate
    /// type of `min`.
    pub fn new(min: Position, max: Position) -> Self {
        let max = max.to_coord_type(min.coord_type());
        Self { min, max }
    }

    /// A 2D box from explicit component values.
    pub fn xy(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Position::xy(min_x, min_y), Position::xy(max_x, max_y))
    }

    /// An empty box of the given coordinate type. All components are
    /// NaN; it never intersects anything and merging it is a no-op.
    pub fn empty(coord_type: CoordinateType) -> Self {
        let nan = Position::from_components(&[f64::NAN; 4], coord_type);
        Self {
            min: nan.clone(),
            max: nan,
        }
    }

    /// The bounding box of a set of positions, or `None` for an empty
    /// set. The coordinate type is taken from the first position.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let coord_type = first.coord_type();
        let dim = coord_type.dim();
        let mut min = [f64::INFINITY; 4];
        let mut max = [f64::NEG_INFINITY; 4];
        for pos in std::iter::once(first).chain(iter) {
            for n in 0..dim {
                let v = pos.value_at(n);
                min[n] = min[n].min(v);
                max[n] = max[n].max(v);
            }
        }
        Some(Self {
            min: Position::from_components(&min, coord_type),
            max: Position::from_components(&max, coord_type),
        })
    }

    /// The bounding box of a series, or `None` when it is empty.
    pub fn from_series(series: &PositionSeries) -> Option<Self> {
        Self::from_positions(series.positions())
    }

    /// Parse a comma- or whitespace-delimited `min..max` component list:
    /// 4 values parse as XY, 6 as XYZ, 8 as XYZM.
    pub fn parse(text: &str) -> GeoposResult<Self> {
        let values = parse_delimited_values(text)?;
        if values.len() % 2 != 0 {
            return Err(GeoposError::Parse(format!(
                "a box needs an even number of values, found {} in {text:?}",
                values.len()
            )));
        }
        let coord_type = CoordinateType::from_dim(values.len() / 2)?;
        let (min, max) = values.split_at(values.len() / 2);
        Ok(Self {
            min: Position::from_components(min, coord_type),
            max: Position::from_components(max, coord_type),
        })
    }

    /// The minimum corner position.
    pub fn min(&self) -> &Position {
        &self.min
    }

    /// The maximum corner position.
    pub fn max(&self) -> &Position {
        &self.max
    }

    /// The coordinate type of both corner positions.
    pub fn coord_type(&self) -> CoordinateType {
        self.min.coord_type()
    }

    /// Whether this box is empty (NaN-valued on x or y).
    pub fn is_empty(&self) -> bool {
        self.min.x().is_nan()
            || self.min.y().is_nan()
            || self.max.x().is_nan()
            || self.max.y().is_nan()
    }

    /// Whether this box crosses the antimeridian (`min.x > max.x`).
    pub fn wraps(&self) -> bool {
        self.min.x() > self.max.x()
    }

    /// The x extent; wrap-aware, so a box from 170 to -170 is 20 wide.
    pub fn width(&self) -> f64 {
        if self.wraps() {
            360.0 - (self.min.x() - self.max.x())
        } else {
            self.max.x() - self.min.x()
        }
    }

    /// The y extent.
    pub fn height(&self) -> f64 {
        self.max.y() - self.min.y()
    }

    /// The perimeter of the rectangle spanned by the two corners.
    pub fn length_2d(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// Component-wise min/max merge per axis.
    ///
    /// When either operand wraps, longitudes are merged in the unrolled
    /// frame and re-normalized; a merged span reaching 360° or more
    /// collapses to the full [-180, 180] range. Merging an empty box is
    /// a no-op. Commutative and associative.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let coord_type = self.coord_type();
        let other_min = other.min.to_coord_type(coord_type);
        let other_max = other.max.to_coord_type(coord_type);

        let mut min = [0.0; 4];
        let mut max = [0.0; 4];
        for n in 1..coord_type.dim() {
            min[n] = self.min.value_at(n).min(other_min.value_at(n));
            max[n] = self.max.value_at(n).max(other_max.value_at(n));
        }

        if !self.wraps() && !other.wraps() {
            min[0] = self.min.x().min(other_min.x());
            max[0] = self.max.x().max(other_max.x());
        } else {
            // Unroll each x range so end >= start, then re-normalize.
            let (a_start, a_end) = self.unrolled_x();
            let (b_start, b_end) = (
                other_min.x(),
                if other.wraps() {
                    other_max.x() + 360.0
                } else {
                    other_max.x()
                },
            );
            let start = a_start.min(b_start);
            let end = a_end.max(b_end);
            if end - start >= 360.0 {
                min[0] = -180.0;
                max[0] = 180.0;
            } else if end > 180.0 {
                min[0] = start;
                max[0] = end - 360.0;
            } else {
                min[0] = start;
                max[0] = end;
            }
        }

        BoundingBox {
            min: Position::from_components(&min, coord_type),
            max: Position::from_components(&max, coord_type),
        }
    }

    fn unrolled_x(&self) -> (f64, f64) {
        if self.wraps() {
            (self.min.x(), self.max.x() + 360.0)
        } else {
            (self.min.x(), self.max.x())
        }
    }

    /// Split a wrapped box at the ±180° seam into two ordinary boxes;
    /// an unwrapped box comes back unchanged as the only element. Every
    /// returned box satisfies `min.x <= max.x`.
    pub fn split_unambiguously(&self) -> Vec<BoundingBox> {
        if !self.wraps() || self.is_empty() {
            return vec![self.clone()];
        }
        let coord_type = self.coord_type();
        let dim = coord_type.dim();
        let mut east_max = [0.0; 4];
        let mut west_min = [0.0; 4];
        for n in 0..dim {
            east_max[n] = self.max.value_at(n);
            west_min[n] = self.min.value_at(n);
        }
        east_max[0] = 180.0;
        west_min[0] = -180.0;
        vec![
            BoundingBox {
                min: self.min.clone(),
                max: Position::from_components(&east_max, coord_type),
            },
            BoundingBox {
                min: Position::from_components(&west_min, coord_type),
                max: self.max.clone(),
            },
        ]
    }

    fn x_overlaps(&self, other: &BoundingBox) -> bool {
        // Compare on the circle by splitting each wrapped operand.
        for a in self.split_unambiguously() {
            for b in other.split_unambiguously() {
                if a.min.x() <= b.max.x() && b.min.x() <= a.max.x() {
                    return true;
                }
            }
        }
        false
    }

    fn y_overlaps(&self, other: &BoundingBox) -> bool {
        self.min.y() <= other.max.y() && other.min.y() <= self.max.y()
    }

    /// Separating-axis intersection test on x and y.
    pub fn intersects_2d(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x_overlaps(other) && self.y_overlaps(other)
    }

    /// Separating-axis intersection test on every axis both operands
    /// carry: x, y, then z and m only when present on both sides.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if !self.intersects_2d(other) {
            return false;
        }
        if self.coord_type().is_3d() && other.coord_type().is_3d() {
            let (a, b) = (self, other);
            if !(a.min.z() <= b.max.z() && b.min.z() <= a.max.z()) {
                return false;
            }
        }
        if self.coord_type().is_measured() && other.coord_type().is_measured() {
            let (a, b) = (self, other);
            if !(a.min.m() <= b.max.m() && b.min.m() <= a.max.m()) {
                return false;
            }
        }
        true
    }

    /// Whether `position` falls inside this box on the x and y axes.
    pub fn intersects_position_2d(&self, position: &Position) -> bool {
        if self.is_empty() {
            return false;
        }
        let x_inside = if self.wraps() {
            position.x() >= self.min.x() || position.x() <= self.max.x()
        } else {
            position.x() >= self.min.x() && position.x() <= self.max.x()
        };
        x_inside && position.y() >= self.min.y() && position.y() <= self.max.y()
    }

    /// Whether `position` falls inside this box on every axis both
    /// operands carry.
    pub fn intersects_position(&self, position: &Position) -> bool {
        if !self.intersects_position_2d(position) {
            return false;
        }
        if self.coord_type().is_3d()
            && position.coord_type().is_3d()
            && !(position.z() >= self.min.z() && position.z() <= self.max.z())
        {
            return false;
        }
        if self.coord_type().is_measured()
            && position.coord_type().is_measured()
            && !(position.m() >= self.min.m() && position.m() <= self.max.m())
        {
            return false;
        }
        true
    }

    /// Corner-wise 2D comparison within `tolerance`.
    pub fn equals_2d(&self, other: &BoundingBox, tolerance: f64) -> bool {
        self.min.equals_2d(&other.min, tolerance) && self.max.equals_2d(&other.max, tolerance)
    }

    /// Corner-wise 3D comparison, x/y within `tolerance_horiz` and z
    /// within `tolerance_vert`.
    pub fn equals_3d(&self, other: &BoundingBox, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        self.min.equals_3d(&other.min, tolerance_horiz, tolerance_vert)
            && self.max.equals_3d(&other.max, tolerance_horiz, tolerance_vert)
    }

    /// The 2D corner positions: 4 for a proper box, 2 when one axis is
    /// degenerate, 1 when both are. Z and m are taken from the matching
    /// corner where one exists and are mid-interpolated on the two
    /// corners that mix min and max.
    pub fn corners_2d(&self) -> Vec<Position> {
        if self.is_empty() {
            return Vec::new();
        }
        let x_degenerate = self.min.x() == self.max.x();
        let y_degenerate = self.min.y() == self.max.y();
        match (x_degenerate, y_degenerate) {
            (true, true) => vec![self.interpolated(self.min.x(), self.min.y(), 0.5)],
            (true, false) | (false, true) => vec![self.min.clone(), self.max.clone()],
            (false, false) => vec![
                self.min.clone(),
                self.interpolated(self.max.x(), self.min.y(), 0.5),
                self.max.clone(),
                self.interpolated(self.min.x(), self.max.y(), 0.5),
            ],
        }
    }

    /// An anchor point inside the box from a per-axis alignment in
    /// [-1, 1]: `(-1, -1)` is the min corner, `(0, 0)` the center,
    /// `(1, 1)` the max corner. The x interpolation is wrap-aware.
    pub fn aligned_2d(&self, alignment: Alignment) -> Position {
        let fx = (alignment.x + 1.0) / 2.0;
        let fy = (alignment.y + 1.0) / 2.0;
        let mut x = self.min.x() + fx * self.width();
        if self.wraps() && x > 180.0 {
            x -= 360.0;
        }
        let y = self.min.y() + fy * self.height();
        self.interpolated(x, y, 0.5)
    }

    /// A position at (x, y) with z/m linearly interpolated between the
    /// corners at fraction `f`.
    fn interpolated(&self, x: f64, y: f64, f: f64) -> Position {
        let coord_type = self.coord_type();
        let z = coord_type
            .is_3d()
            .then(|| self.min.z() + f * (self.max.z() - self.min.z()));
        let m = coord_type
            .is_measured()
            .then(|| self.min.m() + f * (self.max.m() - self.min.m()));
        Position::new(x, y, z, m)
    }
}

impl PartialEq for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

/// A per-axis anchor specification in [-1, 1] for
/// [`BoundingBox::aligned_2d`]. Named constants cover the center, the
/// four corners and the edge midpoints; anything in between is a custom
/// weighted offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Horizontal weight: -1 at `min.x`, 1 at `max.x`.
    pub x: f64,
    /// Vertical weight: -1 at `min.y`, 1 at `max.y`.
    pub y: f64,
}

impl Alignment {
    /// Center of the box.
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };
    /// Midpoint of the north edge.
    pub const NORTH: Self = Self { x: 0.0, y: 1.0 };
    /// Midpoint of the south edge.
    pub const SOUTH: Self = Self { x: 0.0, y: -1.0 };
    /// Midpoint of the east edge.
    pub const EAST: Self = Self { x: 1.0, y: 0.0 };
    /// Midpoint of the west edge.
    pub const WEST: Self = Self { x: -1.0, y: 0.0 };
    /// The max corner.
    pub const NORTH_EAST: Self = Self { x: 1.0, y: 1.0 };
    /// North-west corner.
    pub const NORTH_WEST: Self = Self { x: -1.0, y: 1.0 };
    /// South-east corner.
    pub const SOUTH_EAST: Self = Self { x: 1.0, y: -1.0 };
    /// The min corner.
    pub const SOUTH_WEST: Self = Self { x: -1.0, y: -1.0 };

    /// A custom per-axis alignment.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let bbox = BoundingBox::parse("11.0,12.0,21.0,22.0").unwrap();
        assert_eq!(bbox.min(), &Position::xy(11.0, 12.0));
        assert_eq!(bbox.max(), &Position::xy(21.0, 22.0));
        assert_eq!(BoundingBox::parse(&bbox.to_string()).unwrap(), bbox);

        let bbox3 = BoundingBox::parse("1,2,3,4,5,6").unwrap();
        assert_eq!(bbox3.coord_type(), CoordinateType::XYZ);

        assert!(BoundingBox::parse("1,2,3").is_err());
        assert!(BoundingBox::parse("1,2").is_err());
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let a = BoundingBox::xy(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::xy(1.0, -1.0, 3.0, 1.0);
        let c = BoundingBox::xy(-5.0, 0.5, -4.0, 9.0);

        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
        assert_eq!(a.merge(&b), BoundingBox::xy(0.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = BoundingBox::xy(0.0, 0.0, 2.0, 2.0);
        let empty = BoundingBox::empty(CoordinateType::XY);
        assert_eq!(a.merge(&empty), a);
        assert_eq!(empty.merge(&a), a);
        assert!(empty.merge(&empty).is_empty());
    }

    #[test]
    fn merge_preserves_wraparound() {
        let wrapped = BoundingBox::xy(170.0, 0.0, -170.0, 10.0);
        let east = BoundingBox::xy(160.0, 0.0, 175.0, 5.0);
        let merged = wrapped.merge(&east);
        assert!(merged.wraps());
        assert_eq!(merged.min().x(), 160.0);
        assert_eq!(merged.max().x(), -170.0);

        // A merge spanning the whole circle collapses to [-180, 180].
        let west = BoundingBox::xy(-170.0, 0.0, 165.0, 5.0);
        let full = wrapped.merge(&west);
        assert_eq!(full.min().x(), -180.0);
        assert_eq!(full.max().x(), 180.0);
    }

    #[test]
    fn split_yields_ordered_boxes() {
        let wrapped = BoundingBox::xy(170.0, -5.0, -170.0, 5.0);
        let parts = wrapped.split_unambiguously();
        assert_eq!(parts.len(), 2);
        for part in &parts {
            assert!(part.min().x() <= part.max().x());
        }
        assert_eq!(parts[0].min().x(), 170.0);
        assert_eq!(parts[0].max().x(), 180.0);
        assert_eq!(parts[1].min().x(), -180.0);
        assert_eq!(parts[1].max().x(), -170.0);

        let plain = BoundingBox::xy(0.0, 0.0, 1.0, 1.0);
        assert_eq!(plain.split_unambiguously(), vec![plain]);
    }

    #[test]
    fn intersection_tests_account_for_wrap() {
        let wrapped = BoundingBox::xy(170.0, -5.0, -170.0, 5.0);
        assert!(wrapped.intersects_2d(&BoundingBox::xy(-175.0, -1.0, -160.0, 1.0)));
        assert!(wrapped.intersects_2d(&BoundingBox::xy(172.0, -1.0, 174.0, 1.0)));
        assert!(!wrapped.intersects_2d(&BoundingBox::xy(-150.0, -1.0, 150.0, 1.0)));

        assert!(wrapped.intersects_position_2d(&Position::xy(179.0, 0.0)));
        assert!(wrapped.intersects_position_2d(&Position::xy(-179.0, 0.0)));
        assert!(!wrapped.intersects_position_2d(&Position::xy(0.0, 0.0)));
    }

    #[test]
    fn z_compared_only_when_both_sides_carry_it() {
        let a = BoundingBox::new(Position::xyz(0.0, 0.0, 0.0), Position::xyz(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Position::xyz(0.0, 0.0, 5.0), Position::xyz(1.0, 1.0, 6.0));
        assert!(!a.intersects(&b));

        let flat = BoundingBox::xy(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&flat));

        assert!(a.intersects_position(&Position::xyz(0.5, 0.5, 0.5)));
        assert!(!a.intersects_position(&Position::xyz(0.5, 0.5, 3.0)));
        assert!(a.intersects_position(&Position::xy(0.5, 0.5)));
    }

    #[test]
    fn empty_box_never_intersects() {
        let empty = BoundingBox::empty(CoordinateType::XY);
        let unit = BoundingBox::xy(0.0, 0.0, 1.0, 1.0);
        assert!(!empty.intersects_2d(&unit));
        assert!(!unit.intersects_2d(&empty));
        assert!(!empty.intersects_position_2d(&Position::xy(0.0, 0.0)));
    }

    #[test]
    fn corners_by_degeneracy() {
        let bbox = BoundingBox::new(Position::xyz(0.0, 0.0, 10.0), Position::xyz(4.0, 2.0, 20.0));
        let corners = bbox.corners_2d();
        assert_eq!(corners.len(), 4);
        assert_eq!(corners[0], Position::xyz(0.0, 0.0, 10.0));
        assert_eq!(corners[1], Position::xyz(4.0, 0.0, 15.0));
        assert_eq!(corners[2], Position::xyz(4.0, 2.0, 20.0));
        assert_eq!(corners[3], Position::xyz(0.0, 2.0, 15.0));

        let line = BoundingBox::xy(0.0, 1.0, 0.0, 5.0);
        assert_eq!(line.corners_2d().len(), 2);

        let point = BoundingBox::xy(3.0, 4.0, 3.0, 4.0);
        assert_eq!(point.corners_2d(), vec![Position::xy(3.0, 4.0)]);
    }

    #[test]
    fn aligned_anchor_points() {
        let bbox = BoundingBox::xy(0.0, 0.0, 10.0, 4.0);
        assert_eq!(bbox.aligned_2d(Alignment::CENTER), Position::xy(5.0, 2.0));
        assert_eq!(bbox.aligned_2d(Alignment::SOUTH_WEST), Position::xy(0.0, 0.0));
        assert_eq!(bbox.aligned_2d(Alignment::NORTH_EAST), Position::xy(10.0, 4.0));
        assert_eq!(
            bbox.aligned_2d(Alignment::new(0.5, -0.5)),
            Position::xy(7.5, 1.0)
        );

        let wrapped = BoundingBox::xy(170.0, 0.0, -170.0, 10.0);
        let center = wrapped.aligned_2d(Alignment::CENTER);
        assert_relative_eq!(center.x(), 180.0);
        assert_relative_eq!(center.y(), 5.0);
    }

    #[test]
    fn perimeter_is_wrap_aware() {
        assert_eq!(BoundingBox::xy(0.0, 0.0, 3.0, 2.0).length_2d(), 10.0);
        assert_eq!(BoundingBox::xy(170.0, 0.0, -170.0, 10.0).width(), 20.0);
        assert_eq!(BoundingBox::xy(170.0, 0.0, -170.0, 10.0).length_2d(), 60.0);
    }

    #[test]
    fn bounding_a_series() {
        let series = PositionSeries::parse("1,5,3,2,-1,4", CoordinateType::XY).unwrap();
        let bbox = BoundingBox::from_series(&series).unwrap();
        assert_eq!(bbox, BoundingBox::xy(-1.0, 2.0, 3.0, 5.0));
        assert!(BoundingBox::from_series(&PositionSeries::empty(CoordinateType::XY)).is_none());
    }
}
