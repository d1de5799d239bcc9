use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::coord_type::CoordinateType;
use crate::error::{GeoposError, GeoposResult};

/// The byte-order marker leading every WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Endianness {
    /// Most significant byte first (marker `0`).
    BigEndian = 0,
    /// Least significant byte first (marker `1`).
    LittleEndian = 1,
}

/// The seven base WKB geometry type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WkbGeometryType {
    /// A WKB Point
    Point = 1,
    /// A WKB LineString
    LineString = 2,
    /// A WKB Polygon
    Polygon = 3,
    /// A WKB MultiPoint
    MultiPoint = 4,
    /// A WKB MultiLineString
    MultiLineString = 5,
    /// A WKB MultiPolygon
    MultiPolygon = 6,
    /// A WKB GeometryCollection
    GeometryCollection = 7,
}

/// Extended-WKB flag: the geometry carries z.
pub const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// Extended-WKB flag: the geometry carries m.
pub const EWKB_M_FLAG: u32 = 0x4000_0000;
/// Extended-WKB flag: a 4-byte SRID follows the type code.
pub const EWKB_SRID_FLAG: u32 = 0x2000_0000;

const EWKB_FLAG_MASK: u32 = 0xF000_0000;

/// How dimensionality (and an optional SRID) is folded into the type
/// code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WkbFlavor {
    /// ISO convention: +1000 for Z, +2000 for M, +3000 for ZM; no SRID.
    Iso,
    /// Extended convention: high flag bits for Z/M, and an SRID field
    /// when the SRID flag is set.
    Extended,
}

/// Encoding options for the WKB writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbOptions {
    /// Byte order for every value written.
    pub endianness: Endianness,
    /// Type-code convention.
    pub flavor: WkbFlavor,
    /// SRID to stamp on the outermost geometry. Only written under
    /// [`WkbFlavor::Extended`]; ignored otherwise.
    pub srid: Option<i32>,
}

impl Default for WkbOptions {
    fn default() -> Self {
        Self {
            endianness: Endianness::LittleEndian,
            flavor: WkbFlavor::Iso,
            srid: None,
        }
    }
}

/// A wire type code decomposed into its parts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParsedTypeCode {
    pub kind: WkbGeometryType,
    pub coord_type: CoordinateType,
    pub has_srid: bool,
    pub flavor: WkbFlavor,
}

/// Decompose a raw geometry type code in either convention.
pub(crate) fn parse_type_code(code: u32) -> GeoposResult<ParsedTypeCode> {
    let flags = code & EWKB_FLAG_MASK;
    if flags != 0 {
        if flags & !(EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG) != 0 {
            return Err(GeoposError::Wkb(format!(
                "malformed flag bits in geometry type code {code:#010x}"
            )));
        }
        let base = code & !EWKB_FLAG_MASK;
        let kind = WkbGeometryType::try_from_primitive(base).map_err(|_| {
            GeoposError::Wkb(format!("unsupported WKB geometry type code: {base}"))
        })?;
        Ok(ParsedTypeCode {
            kind,
            coord_type: CoordinateType::new(code & EWKB_Z_FLAG != 0, code & EWKB_M_FLAG != 0),
            has_srid: code & EWKB_SRID_FLAG != 0,
            flavor: WkbFlavor::Extended,
        })
    } else {
        let kind = WkbGeometryType::try_from_primitive(code % 1000).map_err(|_| {
            GeoposError::Wkb(format!(
                "unsupported WKB geometry type code: {}",
                code % 1000
            ))
        })?;
        let coord_type = match code / 1000 {
            0 => CoordinateType::XY,
            1 => CoordinateType::XYZ,
            2 => CoordinateType::XYM,
            3 => CoordinateType::XYZM,
            _ => {
                return Err(GeoposError::Wkb(format!(
                    "unsupported WKB geometry type code: {code}"
                )));
            }
        };
        Ok(ParsedTypeCode {
            kind,
            coord_type,
            has_srid: false,
            flavor: WkbFlavor::Iso,
        })
    }
}

/// Fold a geometry kind and coordinate type into a wire type code.
pub(crate) fn type_code(
    kind: WkbGeometryType,
    coord_type: CoordinateType,
    flavor: WkbFlavor,
    with_srid: bool,
) -> u32 {
    let base: u32 = kind.into();
    match flavor {
        WkbFlavor::Iso => {
            let offset = match coord_type {
                CoordinateType::XY => 0,
                CoordinateType::XYZ => 1000,
                CoordinateType::XYM => 2000,
                CoordinateType::XYZM => 3000,
            };
            base + offset
        }
        WkbFlavor::Extended => {
            let mut code = base;
            if coord_type.is_3d() {
                code |= EWKB_Z_FLAG;
            }
            if coord_type.is_measured() {
                code |= EWKB_M_FLAG;
            }
            if with_srid {
                code |= EWKB_SRID_FLAG;
            }
            code
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iso_codes_round_trip() {
        for kind in [
            WkbGeometryType::Point,
            WkbGeometryType::Polygon,
            WkbGeometryType::GeometryCollection,
        ] {
            for ct in [
                CoordinateType::XY,
                CoordinateType::XYZ,
                CoordinateType::XYM,
                CoordinateType::XYZM,
            ] {
                let code = type_code(kind, ct, WkbFlavor::Iso, false);
                let parsed = parse_type_code(code).unwrap();
                assert_eq!(parsed.kind, kind);
                assert_eq!(parsed.coord_type, ct);
                assert!(!parsed.has_srid);
            }
        }
        assert_eq!(
            type_code(
                WkbGeometryType::MultiPolygon,
                CoordinateType::XYZM,
                WkbFlavor::Iso,
                false
            ),
            3006
        );
    }

    #[test]
    fn extended_codes_round_trip() {
        let code = type_code(
            WkbGeometryType::LineString,
            CoordinateType::XYZ,
            WkbFlavor::Extended,
            true,
        );
        assert_eq!(code, 2 | EWKB_Z_FLAG | EWKB_SRID_FLAG);
        let parsed = parse_type_code(code).unwrap();
        assert_eq!(parsed.kind, WkbGeometryType::LineString);
        assert_eq!(parsed.coord_type, CoordinateType::XYZ);
        assert!(parsed.has_srid);
        assert_eq!(parsed.flavor, WkbFlavor::Extended);
    }

    #[test]
    fn bad_codes_name_the_offender() {
        let err = parse_type_code(8).unwrap_err();
        assert!(err.to_string().contains('8'), "{err}");
        assert!(parse_type_code(4008).is_err());
        assert!(parse_type_code(EWKB_Z_FLAG | 9).is_err());
        // An unknown flag nibble bit is malformed even with a valid base.
        assert!(parse_type_code(0x1000_0000 | 1).is_err());
    }
}
