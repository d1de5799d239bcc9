use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;

use arrow_buffer::ScalarBuffer;

use crate::coord_type::CoordinateType;
use crate::eq::series_coords_eq;
use crate::error::{GeoposError, GeoposResult};
use crate::position::{parse_delimited_values, Position};

/// An ordered, homogeneous sequence of positions.
///
/// A series is an immutable value: every "mutating" operation returns a
/// new series. Storage is one of a closed set of backings:
///
/// - *flat*: a shared [`ScalarBuffer`] of `len · dim` interleaved values,
///   usable zero-copy over externally produced data;
/// - *positions*: a shared list of [`Position`] values, possibly of
///   heterogeneous coordinate types. Every read coerces to the series'
///   declared type; the source positions are never mutated.
///
/// [`range`][Self::range] and [`reversed`][Self::reversed] are logical
/// views over the same backing — no coordinate is copied, and the two
/// compose: `s.reversed().range(a, b)` is value-equal to
/// `s.range(len - b, len - a).reversed()`.
#[derive(Debug, Clone)]
pub struct PositionSeries {
    backing: Backing,
    coord_type: CoordinateType,
    /// Window start into the backing, in positions.
    start: usize,
    len: usize,
    reversed: bool,
}

#[derive(Debug, Clone)]
enum Backing {
    Flat(ScalarBuffer<f64>),
    Positions(Arc<[Position]>),
}

impl PositionSeries {
    /// A zero-copy series over a flat buffer of interleaved values.
    ///
    /// The element count is `values.len() / coord_type.dim()`; a trailing
    /// remainder shorter than one position is ignored.
    pub fn view(values: impl Into<ScalarBuffer<f64>>, coord_type: CoordinateType) -> Self {
        let values = values.into();
        let len = values.len() / coord_type.dim();
        Self {
            backing: Backing::Flat(values),
            coord_type,
            start: 0,
            len,
            reversed: false,
        }
    }

    /// A series over a list of positions, reporting `coord_type` for
    /// every element regardless of what each source position carries.
    pub fn from_positions(positions: Vec<Position>, coord_type: CoordinateType) -> Self {
        let positions: Arc<[Position]> = positions.into();
        let len = positions.len();
        Self {
            backing: Backing::Positions(positions),
            coord_type,
            start: 0,
            len,
            reversed: false,
        }
    }

    /// An empty series of the given coordinate type.
    pub fn empty(coord_type: CoordinateType) -> Self {
        Self::view(Vec::<f64>::new(), coord_type)
    }

    /// Parse comma- or whitespace-delimited values into a series of
    /// `coord_type`. The token count must be a multiple of the type's
    /// dimension.
    pub fn parse(text: &str, coord_type: CoordinateType) -> GeoposResult<Self> {
        let values = parse_delimited_values(text)?;
        if values.len() % coord_type.dim() != 0 {
            return Err(GeoposError::Parse(format!(
                "{} values cannot form {coord_type} positions of {} components each",
                values.len(),
                coord_type.dim()
            )));
        }
        Ok(Self::view(values, coord_type))
    }

    /// The number of positions in this series.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this series has no positions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The coordinate type every element of this series reports.
    pub fn coord_type(&self) -> CoordinateType {
        self.coord_type
    }

    /// Map a logical index to a physical index into the backing.
    fn physical(&self, i: usize) -> usize {
        if self.reversed {
            self.start + self.len - 1 - i
        } else {
            self.start + i
        }
    }

    /// Read position `i` without a bounds check. Sub-views into a flat
    /// backing share the buffer; they do not copy coordinates.
    fn position_unchecked(&self, i: usize) -> Position {
        let physical = self.physical(i);
        match &self.backing {
            Backing::Flat(values) => Position::view(
                values.clone(),
                physical * self.coord_type.dim(),
                self.coord_type,
            )
            .expect("flat backing length is a multiple of the dimension"),
            Backing::Positions(positions) => positions[physical].to_coord_type(self.coord_type),
        }
    }

    fn check_index(&self, i: usize) -> GeoposResult<()> {
        if i >= self.len {
            return Err(GeoposError::Range(format!(
                "position index {i} out of bounds for series of length {}",
                self.len
            )));
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> GeoposResult<()> {
        if start > end || end > self.len {
            return Err(GeoposError::Range(format!(
                "range {start}..{end} out of bounds for series of length {}",
                self.len
            )));
        }
        Ok(())
    }

    /// The position at index `i`.
    pub fn get(&self, i: usize) -> GeoposResult<Position> {
        self.check_index(i)?;
        Ok(self.position_unchecked(i))
    }

    /// The first position, if any.
    pub fn first(&self) -> Option<Position> {
        (!self.is_empty()).then(|| self.position_unchecked(0))
    }

    /// The last position, if any.
    pub fn last(&self) -> Option<Position> {
        (!self.is_empty()).then(|| self.position_unchecked(self.len - 1))
    }

    /// The x coordinate of position `i`.
    pub fn x(&self, i: usize) -> GeoposResult<f64> {
        Ok(self.get(i)?.x())
    }

    /// The y coordinate of position `i`.
    pub fn y(&self, i: usize) -> GeoposResult<f64> {
        Ok(self.get(i)?.y())
    }

    /// The z coordinate of position `i`, `0.0` if the series is not 3D.
    pub fn z(&self, i: usize) -> GeoposResult<f64> {
        Ok(self.get(i)?.z())
    }

    /// The m value of position `i`, `0.0` if the series is not measured.
    pub fn m(&self, i: usize) -> GeoposResult<f64> {
        Ok(self.get(i)?.m())
    }

    /// Iterate all positions in logical order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        (0..self.len).map(|i| self.position_unchecked(i))
    }

    /// A logical sub-view of positions `start..end` over the same
    /// backing.
    pub fn range(&self, start: usize, end: usize) -> GeoposResult<Self> {
        self.check_range(start, end)?;
        let physical_start = if self.reversed {
            self.start + self.len - end
        } else {
            self.start + start
        };
        Ok(Self {
            backing: self.backing.clone(),
            coord_type: self.coord_type,
            start: physical_start,
            len: end - start,
            reversed: self.reversed,
        })
    }

    /// A logical view of this series in reverse order, over the same
    /// backing.
    pub fn reversed(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            coord_type: self.coord_type,
            start: self.start,
            len: self.len,
            reversed: !self.reversed,
        }
    }

    /// A new series with `position` inserted before index `i`. `i` may
    /// equal the length, appending.
    pub fn inserted(&self, i: usize, position: Position) -> GeoposResult<Self> {
        if i > self.len {
            return Err(GeoposError::Range(format!(
                "insertion index {i} out of bounds for series of length {}",
                self.len
            )));
        }
        let mut positions: Vec<Position> = self.positions().collect();
        positions.insert(i, position);
        Ok(Self::from_positions(positions, self.coord_type))
    }

    /// A new series with `position` appended.
    pub fn added(&self, position: Position) -> Self {
        self.inserted(self.len, position)
            .expect("appending at the length index is always in bounds")
    }

    /// A new series with positions `start..end` replaced by
    /// `replacement`.
    pub fn range_replaced(
        &self,
        start: usize,
        end: usize,
        replacement: Vec<Position>,
    ) -> GeoposResult<Self> {
        self.check_range(start, end)?;
        let mut positions: Vec<Position> = self.positions().collect();
        positions.splice(start..end, replacement);
        Ok(Self::from_positions(positions, self.coord_type))
    }

    /// A new series with positions `start..end` removed.
    pub fn range_removed(&self, start: usize, end: usize) -> GeoposResult<Self> {
        self.range_replaced(start, end, Vec::new())
    }

    /// A new series sorted by `compare`. The sort is stable.
    pub fn sorted(&self, mut compare: impl FnMut(&Position, &Position) -> Ordering) -> Self {
        let mut positions: Vec<Position> = self.positions().collect();
        positions.sort_by(|a, b| compare(a, b));
        Self::from_positions(positions, self.coord_type)
    }

    /// A new series keeping the positions for which `predicate` returns
    /// true. The predicate receives the total count, the index and the
    /// position, so policies like "drop the last two" need no external
    /// state.
    pub fn filtered(&self, mut predicate: impl FnMut(usize, usize, &Position) -> bool) -> Self {
        let total = self.len;
        let positions: Vec<Position> = self
            .positions()
            .enumerate()
            .filter(|(i, pos)| predicate(total, *i, pos))
            .map(|(_, pos)| pos)
            .collect();
        Self::from_positions(positions, self.coord_type)
    }

    /// A new series with every position mapped through `f`.
    ///
    /// `f` receives each source position and constructs the output; the
    /// output series takes its coordinate type from the first constructed
    /// position (an empty series keeps its type). Algorithms that build
    /// non-`Position` outputs use [`positions`][Self::positions] with a
    /// plain iterator `map` instead — the constructor is the closure.
    pub fn transform(&self, mut f: impl FnMut(&Position) -> Position) -> Self {
        let positions: Vec<Position> = self.positions().map(|pos| f(&pos)).collect();
        let coord_type = positions
            .first()
            .map(Position::coord_type)
            .unwrap_or(self.coord_type);
        Self::from_positions(positions, coord_type)
    }

    /// Lazily produce the flat values of this series coerced to
    /// `target`: a missing z or m reads as `0.0`, extra components are
    /// dropped. Nothing is materialized ahead of consumption, so
    /// streaming encoders can pull from arbitrarily large series.
    pub fn values_by_type(&self, target: CoordinateType) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).flat_map(move |i| {
            let pos = self.position_unchecked(i);
            (0..target.dim()).map(move |n| coerced_component(&pos, target, n))
        })
    }

    /// Lazily produce the flat values of this series in its own
    /// coordinate type.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values_by_type(self.coord_type)
    }

    /// Copy this series into a dedicated contiguous flat buffer,
    /// decoupled from any externally owned storage.
    pub fn packed(&self) -> Self {
        Self::view(self.values().collect::<Vec<_>>(), self.coord_type)
    }

    /// Like [`packed`][Self::packed], rounding every value to `decimals`
    /// decimal places.
    pub fn packed_rounded(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        let values: Vec<f64> = self.values().map(|v| (v * factor).round() / factor).collect();
        Self::view(values, self.coord_type)
    }

    /// Exact comparison of raw values and coordinate type, with no
    /// tolerance and no cross-type collapse. Strictly tighter than
    /// [`equals_2d`][Self::equals_2d]/[`equals_3d`][Self::equals_3d].
    pub fn equals_coords(&self, other: &PositionSeries) -> bool {
        series_coords_eq(self, other)
    }

    /// Per-index 2D comparison within `tolerance`.
    pub fn equals_2d(&self, other: &PositionSeries, tolerance: f64) -> bool {
        self.len == other.len
            && self
                .positions()
                .zip(other.positions())
                .all(|(a, b)| a.equals_2d(&b, tolerance))
    }

    /// Per-index 3D comparison, x/y within `tolerance_horiz` and z
    /// within `tolerance_vert`. False unless both series are 3D.
    pub fn equals_3d(
        &self,
        other: &PositionSeries,
        tolerance_horiz: f64,
        tolerance_vert: f64,
    ) -> bool {
        if !self.coord_type.is_3d() || !other.coord_type.is_3d() {
            return false;
        }
        self.len == other.len
            && self
                .positions()
                .zip(other.positions())
                .all(|(a, b)| a.equals_3d(&b, tolerance_horiz, tolerance_vert))
    }

    /// Whether this series starts and ends on the same 2D position.
    /// Empty series count as closed.
    pub fn is_closed_2d(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.equals_2d(&last, 0.0),
            _ => true,
        }
    }
}

/// Component `n` of `pos` in the declared order of `target`, reading
/// `0.0` for a z or m the source does not carry.
fn coerced_component(pos: &Position, target: CoordinateType, n: usize) -> f64 {
    match n {
        0 => pos.x(),
        1 => pos.y(),
        2 if target.is_3d() => pos.z(),
        2 => pos.m(),
        3 => pos.m(),
        _ => unreachable!("coordinate dimension is at most 4"),
    }
}

impl PartialEq for PositionSeries {
    fn eq(&self, other: &Self) -> bool {
        series_coords_eq(self, other)
    }
}

impl Display for PositionSeries {
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
