//! Centralized value-equality rules.
//!
//! The "absent vs. zero" convention lives here and only here: a position
//! of one coordinate type never equals a position of another, with the
//! single documented exception that an XYZM position whose z and m are
//! both exactly zero equals an XY position sharing its x and y. Every
//! `PartialEq` impl in the crate routes through these functions so the
//! rule cannot diverge between representations.

use crate::coord_type::CoordinateType;
use crate::position::Position;
use crate::series::PositionSeries;

/// Exact value equality between two positions of any representation.
pub(crate) fn position_eq(left: &Position, right: &Position) -> bool {
    let (lt, rt) = (left.coord_type(), right.coord_type());
    if lt == rt {
        return left.values().eq(right.values());
    }
    match (lt, rt) {
        (CoordinateType::XY, CoordinateType::XYZM) => xyzm_collapses_to(right, left),
        (CoordinateType::XYZM, CoordinateType::XY) => xyzm_collapses_to(left, right),
        _ => false,
    }
}

/// Whether `xyzm` carries zero z and m and shares x/y with `xy`.
fn xyzm_collapses_to(xyzm: &Position, xy: &Position) -> bool {
    xyzm.z() == 0.0 && xyzm.m() == 0.0 && xyzm.x() == xy.x() && xyzm.y() == xy.y()
}

/// Exact comparison of raw coordinate values and coordinate type.
///
/// Stricter than [`position_eq`]: no cross-type collapse, every raw value
/// must match bit-for-bit under `f64` equality. Used for idempotence
/// checks, distinct from the tolerant geometric comparisons.
pub(crate) fn series_coords_eq(left: &PositionSeries, right: &PositionSeries) -> bool {
    if left.coord_type() != right.coord_type() || left.len() != right.len() {
        return false;
    }
    left.values().eq(right.values())
}
