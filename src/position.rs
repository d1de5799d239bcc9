use std::fmt::Display;

use arrow_buffer::ScalarBuffer;

use crate::coord_type::CoordinateType;
use crate::eq::position_eq;
use crate::error::{GeoposError, GeoposResult};

/// A single read-only coordinate tuple `(x, y[, z][, m])`.
///
/// Storage is one of a closed set of representations:
///
/// - *materialized*: the position owns its 2–4 numbers;
/// - *sub-view*: the position holds a shared [`ScalarBuffer`] handle and
///   an element offset into it, owning no coordinate data. Cloning a
///   sub-view bumps the buffer's reference count; the numbers themselves
///   are never copied.
///
/// Both representations answer the same accessors. Components a position
/// does not carry read as `0.0` through [`value_at`][Self::value_at] and
/// the [`z`][Self::z]/[`m`][Self::m] shorthands, while
/// [`opt_value_at`][Self::opt_value_at] distinguishes "absent" from
/// "present and zero".
#[derive(Debug, Clone)]
pub struct Position {
    repr: Repr,
    coord_type: CoordinateType,
}

#[derive(Debug, Clone)]
enum Repr {
    /// Owns up to four numbers in declared coordinate order.
    Owned([f64; 4]),
    /// Element offset into a shared flat buffer.
    View { values: ScalarBuffer<f64>, offset: usize },
}

impl Position {
    /// Construct a materialized position; the coordinate type is derived
    /// from which optional components are given.
    pub fn new(x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Self {
        let coord_type = CoordinateType::new(z.is_some(), m.is_some());
        let mut values = [x, y, 0.0, 0.0];
        let mut next = 2;
        if let Some(z) = z {
            values[next] = z;
            next += 1;
        }
        if let Some(m) = m {
            values[next] = m;
        }
        Self {
            repr: Repr::Owned(values),
            coord_type,
        }
    }

    /// A materialized 2D position.
    pub fn xy(x: f64, y: f64) -> Self {
        Self::new(x, y, None, None)
    }

    /// A materialized 3D position.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, Some(z), None)
    }

    /// A materialized measured 2D position.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self::new(x, y, None, Some(m))
    }

    /// A materialized measured 3D position.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self::new(x, y, Some(z), Some(m))
    }

    /// A zero-copy sub-view into `values`, reading `coord_type.dim()`
    /// components starting at element `offset`.
    ///
    /// The buffer handle is shared, not copied. Errors with a range error
    /// if the tuple would not fit in the buffer.
    pub fn view(
        values: ScalarBuffer<f64>,
        offset: usize,
        coord_type: CoordinateType,
    ) -> GeoposResult<Self> {
        if offset + coord_type.dim() > values.len() {
            return Err(GeoposError::Range(format!(
                "position view at offset {offset} with {} components exceeds buffer of {} values",
                coord_type.dim(),
                values.len()
            )));
        }
        Ok(Self {
            repr: Repr::View { values, offset },
            coord_type,
        })
    }

    /// Parse a comma- or whitespace-delimited position.
    ///
    /// With `coord_type` given, the token count must match its dimension.
    /// Without it, the count infers the type (three values resolve to
    /// XYZ, per [`CoordinateType::from_dim`]).
    pub fn parse(text: &str, coord_type: Option<CoordinateType>) -> GeoposResult<Self> {
        let values = parse_delimited_values(text)?;
        let coord_type = match coord_type {
            Some(ct) => {
                if values.len() != ct.dim() {
                    return Err(GeoposError::Parse(format!(
                        "expected {} coordinate values for {ct}, found {} in {text:?}",
                        ct.dim(),
                        values.len()
                    )));
                }
                ct
            }
            None => CoordinateType::from_dim(values.len())?,
        };
        Ok(Self::from_components(&values, coord_type))
    }

    /// Build a materialized position from `coord_type.dim()` leading
    /// values in declared coordinate order. Extra values are ignored.
    pub(crate) fn from_components(values: &[f64], coord_type: CoordinateType) -> Self {
        debug_assert!(values.len() >= coord_type.dim());
        let mut owned = [0.0; 4];
        owned[..coord_type.dim()].copy_from_slice(&values[..coord_type.dim()]);
        Self {
            repr: Repr::Owned(owned),
            coord_type,
        }
    }

    /// The coordinate type of this position.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    fn component(&self, n: usize) -> f64 {
        match &self.repr {
            Repr::Owned(values) => values[n],
            Repr::View { values, offset } => values[offset + n],
        }
    }

    /// The x coordinate.
    pub fn x(&self) -> f64 {
        self.component(0)
    }

    /// The y coordinate.
    pub fn y(&self) -> f64 {
        self.component(1)
    }

    /// The z coordinate, or `0.0` when this position is not 3D.
    pub fn z(&self) -> f64 {
        self.opt_z().unwrap_or(0.0)
    }

    /// The m value, or `0.0` when this position is not measured.
    pub fn m(&self) -> f64 {
        self.opt_m().unwrap_or(0.0)
    }

    /// The z coordinate, if present.
    pub fn opt_z(&self) -> Option<f64> {
        self.coord_type.is_3d().then(|| self.component(2))
    }

    /// The m value, if present.
    pub fn opt_m(&self) -> Option<f64> {
        self.coord_type
            .is_measured()
            .then(|| self.component(self.coord_type.dim() - 1))
    }

    /// The `n`th component in declared coordinate order, or `0.0` when
    /// `n` is at or beyond this position's dimension.
    pub fn value_at(&self, n: usize) -> f64 {
        self.opt_value_at(n).unwrap_or(0.0)
    }

    /// The `n`th component in declared coordinate order, if present.
    pub fn opt_value_at(&self, n: usize) -> Option<f64> {
        (n < self.coord_type.dim()).then(|| self.component(n))
    }

    /// Iterate the present components in declared coordinate order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.coord_type.dim()).map(|n| self.component(n))
    }

    /// Coerce to `target`, filling a missing z or m with `0.0` and
    /// dropping components the target does not carry. A matching target
    /// returns a cheap clone; an actual conversion materializes.
    pub fn to_coord_type(&self, target: CoordinateType) -> Position {
        if target == self.coord_type {
            return self.clone();
        }
        let mut values = [0.0; 4];
        values[0] = self.x();
        values[1] = self.y();
        let mut next = 2;
        if target.is_3d() {
            values[next] = self.z();
            next += 1;
        }
        if target.is_measured() {
            values[next] = self.m();
        }
        Position {
            repr: Repr::Owned(values),
            coord_type: target,
        }
    }

    /// Compare only x and y, each within `tolerance`.
    pub fn equals_2d(&self, other: &Position, tolerance: f64) -> bool {
        (self.x() - other.x()).abs() <= tolerance && (self.y() - other.y()).abs() <= tolerance
    }

    /// Compare x and y within `tolerance_horiz` and z within
    /// `tolerance_vert`, ignoring m. Positions that are not both 3D never
    /// compare equal in 3D.
    pub fn equals_3d(&self, other: &Position, tolerance_horiz: f64, tolerance_vert: f64) -> bool {
        if !self.coord_type.is_3d() || !other.coord_type.is_3d() {
            return false;
        }
        self.equals_2d(other, tolerance_horiz) && (self.z() - other.z()).abs() <= tolerance_vert
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        position_eq(self, other)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for value in self.values() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Split `text` on commas and/or whitespace and parse every token as a
/// number, failing with a parse error naming the offending token.
pub(crate) fn parse_delimited_values(text: &str) -> GeoposResult<Vec<f64>> {
    let mut values = Vec::new();
    for token in text.split(',').flat_map(str::split_whitespace) {
        let value: f64 = token.parse().map_err(|_| {
            GeoposError::Parse(format!("invalid numeric token {token:?} in {text:?}"))
        })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(GeoposError::Parse(format!(
            "no coordinate values in {text:?}"
        )));
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accessors_fill_missing_with_zero() {
        let pos = Position::xym(1.0, 2.0, 9.0);
        assert_eq!(pos.coord_type(), CoordinateType::XYM);
        assert_eq!(pos.x(), 1.0);
        assert_eq!(pos.y(), 2.0);
        assert_eq!(pos.z(), 0.0);
        assert_eq!(pos.opt_z(), None);
        assert_eq!(pos.m(), 9.0);
        assert_eq!(pos.opt_m(), Some(9.0));
        assert_eq!(pos.value_at(2), 9.0);
        assert_eq!(pos.value_at(3), 0.0);
        assert_eq!(pos.opt_value_at(3), None);
    }

    #[test]
    fn view_shares_buffer() {
        let buffer = ScalarBuffer::from(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        let pos = Position::view(buffer.clone(), 3, CoordinateType::XYZ).unwrap();
        assert_eq!(pos.x(), 40.0);
        assert_eq!(pos.y(), 50.0);
        assert_eq!(pos.z(), 60.0);

        assert!(Position::view(buffer, 4, CoordinateType::XYZ).is_err());
    }

    #[test]
    fn coercion_fills_and_drops() {
        let pos = Position::xyz(1.0, 2.0, 3.0);
        let widened = pos.to_coord_type(CoordinateType::XYZM);
        assert_eq!(widened.values().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0, 0.0]);

        let narrowed = pos.to_coord_type(CoordinateType::XYM);
        assert_eq!(narrowed.values().collect::<Vec<_>>(), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn parse_infers_and_validates_arity() {
        let pos = Position::parse("1, 2, 3", None).unwrap();
        assert_eq!(pos.coord_type(), CoordinateType::XYZ);

        let pos = Position::parse("1 2 3", Some(CoordinateType::XYM)).unwrap();
        assert_eq!(pos.m(), 3.0);

        assert!(Position::parse("1,2,3", Some(CoordinateType::XY)).is_err());
        assert!(Position::parse("1,banana", None).is_err());
    }

    #[test]
    fn cross_type_equality() {
        let xy = Position::xy(1.0, 2.0);
        let xyz = Position::xyz(1.0, 2.0, 0.0);
        let zeroed = Position::xyzm(1.0, 2.0, 0.0, 0.0);
        let measured = Position::xyzm(1.0, 2.0, 0.0, 5.0);

        // Absence-as-zero applies only to the XY / XYZM pair.
        assert_eq!(xy, zeroed);
        assert_eq!(zeroed, xy);
        assert_ne!(xy, xyz);
        assert_ne!(xy, measured);
    }

    #[test]
    fn tolerant_comparisons() {
        let a = Position::xyz(1.0, 2.0, 3.0);
        let b = Position::xyz(1.05, 2.0, 3.4);
        assert!(a.equals_2d(&b, 0.1));
        assert!(!a.equals_2d(&b, 0.01));
        assert!(a.equals_3d(&b, 0.1, 0.5));
        assert!(!a.equals_3d(&b, 0.1, 0.1));
        assert!(!a.equals_3d(&Position::xy(1.0, 2.0), 0.1, 0.1));
    }

    #[test]
    fn display_round_trips() {
        let pos = Position::xyzm(1.5, -2.0, 3.0, 4.25);
        assert_eq!(pos.to_string(), "1.5,-2,3,4.25");
        assert_eq!(Position::parse(&pos.to_string(), None).unwrap(), pos);
    }
}
