//! Defines [`GeoposError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoposError {
    /// Malformed binary (WKB/EWKB) input: unknown type code, truncated
    /// buffer, or bad byte-order marker.
    #[error("WKB error: {0}")]
    Wkb(String),

    /// Malformed text (WKT/EWKT) input: unknown keyword, unbalanced
    /// delimiters, or a tuple whose arity does not match the declared
    /// coordinate type.
    #[error("WKT error: {0}")]
    Wkt(String),

    /// Malformed delimited-text input for a bare position, series or box.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Out-of-bounds index or range on a series or ring access.
    #[error("Range error: {0}")]
    Range(String),

    /// Geometry that violates a structural invariant, e.g. a polygon ring
    /// with fewer than 4 positions or one that is not closed.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type GeoposResult<T> = std::result::Result<T, GeoposError>;
