use std::fmt::Display;

use crate::error::{GeoposError, GeoposResult};

/// The coordinate type of a position, series, box or geometry.
///
/// Tags which of the four components {x, y, z, m} are present. The
/// dimension is always `2 + is_3d + is_measured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateType {
    /// Two-dimensional.
    XY,

    /// Three-dimensional.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl CoordinateType {
    /// Construct from explicit component flags.
    pub fn new(is_3d: bool, is_measured: bool) -> Self {
        match (is_3d, is_measured) {
            (false, false) => CoordinateType::XY,
            (true, false) => CoordinateType::XYZ,
            (false, true) => CoordinateType::XYM,
            (true, true) => CoordinateType::XYZM,
        }
    }

    /// Construct from a numeric dimension.
    ///
    /// A dimension of 3 is ambiguous between [`XYZ`][Self::XYZ] and
    /// [`XYM`][Self::XYM]; this resolves to XYZ. Callers that mean XYM
    /// must say so explicitly via [`CoordinateType::new`].
    pub fn from_dim(dim: usize) -> GeoposResult<Self> {
        match dim {
            2 => Ok(CoordinateType::XY),
            3 => Ok(CoordinateType::XYZ),
            4 => Ok(CoordinateType::XYZM),
            _ => Err(GeoposError::Parse(format!(
                "Invalid coordinate dimension: {dim} (expected 2, 3 or 4)"
            ))),
        }
    }

    /// Returns the number of components per position.
    pub fn dim(&self) -> usize {
        match self {
            CoordinateType::XY => 2,
            CoordinateType::XYZ => 3,
            CoordinateType::XYM => 3,
            CoordinateType::XYZM => 4,
        }
    }

    /// Whether a z component is present.
    pub fn is_3d(&self) -> bool {
        matches!(self, CoordinateType::XYZ | CoordinateType::XYZM)
    }

    /// Whether an m component is present.
    pub fn is_measured(&self) -> bool {
        matches!(self, CoordinateType::XYM | CoordinateType::XYZM)
    }

    /// The dimension keyword this type carries in WKT, including a
    /// leading space, e.g. `" ZM"`. Empty for XY.
    pub fn wkt_suffix(&self) -> &'static str {
        match self {
            CoordinateType::XY => "",
            CoordinateType::XYZ => " Z",
            CoordinateType::XYM => " M",
            CoordinateType::XYZM => " ZM",
        }
    }
}

impl Display for CoordinateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateType::XY => write!(f, "XY"),
            CoordinateType::XYZ => write!(f, "XYZ"),
            CoordinateType::XYM => write!(f, "XYM"),
            CoordinateType::XYZM => write!(f, "XYZM"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_and_dim_agree() {
        for ct in [
            CoordinateType::XY,
            CoordinateType::XYZ,
            CoordinateType::XYM,
            CoordinateType::XYZM,
        ] {
            assert_eq!(
                ct.dim(),
                2 + ct.is_3d() as usize + ct.is_measured() as usize
            );
            assert_eq!(CoordinateType::new(ct.is_3d(), ct.is_measured()), ct);
        }
    }

    #[test]
    fn from_dim_defaults_to_xyz() {
        assert_eq!(CoordinateType::from_dim(2).unwrap(), CoordinateType::XY);
        assert_eq!(CoordinateType::from_dim(3).unwrap(), CoordinateType::XYZ);
        assert_eq!(CoordinateType::from_dim(4).unwrap(), CoordinateType::XYZM);
        assert!(CoordinateType::from_dim(1).is_err());
        assert!(CoordinateType::from_dim(5).is_err());
    }
}
