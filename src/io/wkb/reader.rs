use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::coord_type::CoordinateType;
use crate::error::{GeoposError, GeoposResult};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::io::wkb::common::{parse_type_code, Endianness, WkbFlavor, WkbGeometryType};
use crate::position::Position;
use crate::series::PositionSeries;

/// How a decoded WKB buffer was encoded, for byte-identical re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WkbInfo {
    /// Byte order of the outermost geometry.
    pub endianness: Endianness,
    /// Type-code convention of the outermost geometry.
    pub flavor: WkbFlavor,
    /// SRID carried by the outermost geometry, if any.
    pub srid: Option<i32>,
}

/// Decode a WKB or EWKB buffer.
///
/// This entry point is SRID-agnostic: an extended-WKB SRID field is
/// recognized, read and discarded rather than rejected, because real
/// producers disagree on when to emit it.
pub fn read_wkb(buf: &[u8]) -> GeoposResult<Geometry> {
    Ok(read_wkb_info(buf)?.0)
}

/// Decode an EWKB buffer, surfacing the outermost SRID when present.
pub fn read_ewkb(buf: &[u8]) -> GeoposResult<(Geometry, Option<i32>)> {
    let (geometry, info) = read_wkb_info(buf)?;
    Ok((geometry, info.srid))
}

/// Decode a buffer and report how it was encoded. Re-encoding with
/// options matching the returned [`WkbInfo`] reproduces the input byte
/// for byte.
pub fn read_wkb_info(buf: &[u8]) -> GeoposResult<(Geometry, WkbInfo)> {
    let mut reader = WkbReader::new(buf);
    let header = reader.read_header()?;
    let info = WkbInfo {
        endianness: header.endianness,
        flavor: header.flavor,
        srid: header.srid,
    };
    let geometry = reader.read_body(&header)?;
    Ok((geometry, info))
}

struct Header {
    endianness: Endianness,
    kind: WkbGeometryType,
    coord_type: CoordinateType,
    flavor: WkbFlavor,
    srid: Option<i32>,
}

/// A bounds-checked cursor over a WKB buffer.
struct WkbReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WkbReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Advance past `count` bytes, failing with expected-vs-available
    /// context on a truncated buffer.
    fn take(&mut self, count: usize) -> GeoposResult<&'a [u8]> {
        let available = self.buf.len() - self.pos;
        if count > available {
            return Err(GeoposError::Wkb(format!(
                "truncated buffer at byte {}: expected {count} more bytes, {available} available",
                self.pos
            )));
        }
        let slice = &self.buf[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    fn read_u8(&mut self) -> GeoposResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self, endianness: Endianness) -> GeoposResult<u32> {
        let bytes = self.take(4)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_u32(bytes),
            Endianness::LittleEndian => LittleEndian::read_u32(bytes),
        })
    }

    fn read_i32(&mut self, endianness: Endianness) -> GeoposResult<i32> {
        let bytes = self.take(4)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_i32(bytes),
            Endianness::LittleEndian => LittleEndian::read_i32(bytes),
        })
    }

    fn read_f64(&mut self, endianness: Endianness) -> GeoposResult<f64> {
        let bytes = self.take(8)?;
        Ok(match endianness {
            Endianness::BigEndian => BigEndian::read_f64(bytes),
            Endianness::LittleEndian => LittleEndian::read_f64(bytes),
        })
    }

    /// Read a geometry header: byte-order marker, type code, and the
    /// SRID field when the code flags one.
    fn read_header(&mut self) -> GeoposResult<Header> {
        let marker = self.read_u8()?;
        let endianness = Endianness::try_from(marker).map_err(|_| {
            GeoposError::Wkb(format!(
                "invalid byte order marker {marker} (expected 0 or 1)"
            ))
        })?;
        let code = self.read_u32(endianness)?;
        let parsed = parse_type_code(code)?;
        let srid = if parsed.has_srid {
            Some(self.read_i32(endianness)?)
        } else {
            None
        };
        Ok(Header {
            endianness,
            kind: parsed.kind,
            coord_type: parsed.coord_type,
            flavor: parsed.flavor,
            srid,
        })
    }

    /// Read one coordinate tuple of `coord_type.dim()` doubles.
    fn read_position(
        &mut self,
        endianness: Endianness,
        coord_type: CoordinateType,
    ) -> GeoposResult<Position> {
        let mut values = [0.0; 4];
        for value in values.iter_mut().take(coord_type.dim()) {
            *value = self.read_f64(endianness)?;
        }
        Ok(Position::from_components(&values, coord_type))
    }

    /// Read a count-prefixed run of coordinate tuples as a series.
    fn read_series(
        &mut self,
        endianness: Endianness,
        coord_type: CoordinateType,
    ) -> GeoposResult<PositionSeries> {
        let count = self.read_u32(endianness)? as usize;
        let dim = coord_type.dim();
        let mut values = Vec::with_capacity(count * dim);
        for _ in 0..count * dim {
            values.push(self.read_f64(endianness)?);
        }
        Ok(PositionSeries::view(values, coord_type))
    }

    /// Read the payload following an already-consumed header.
    fn read_body(&mut self, header: &Header) -> GeoposResult<Geometry> {
        let endianness = header.endianness;
        let coord_type = header.coord_type;
        match header.kind {
            WkbGeometryType::Point => {
                let position = self.read_position(endianness, coord_type)?;
                // An all-NaN tuple is the wire form of POINT EMPTY.
                if position.values().all(f64::is_nan) {
                    Ok(Point::empty(coord_type).into())
                } else {
                    Ok(Point::new(position).into())
                }
            }
            WkbGeometryType::LineString => {
                let chain = self.read_series(endianness, coord_type)?;
                Ok(LineString::new(chain).into())
            }
            WkbGeometryType::Polygon => {
                let num_rings = self.read_u32(endianness)? as usize;
                let mut rings = Vec::with_capacity(num_rings);
                for _ in 0..num_rings {
                    rings.push(self.read_series(endianness, coord_type)?);
                }
                Ok(Polygon::new(rings, coord_type)?.into())
            }
            WkbGeometryType::MultiPoint => {
                let points = self.read_children(endianness, |child| match child {
                    Geometry::Point(point) => Ok(point),
                    other => Err(unexpected_child("MultiPoint", &other)),
                })?;
                Ok(MultiPoint::new(points, coord_type).into())
            }
            WkbGeometryType::MultiLineString => {
                let line_strings = self.read_children(endianness, |child| match child {
                    Geometry::LineString(line) => Ok(line),
                    other => Err(unexpected_child("MultiLineString", &other)),
                })?;
                Ok(MultiLineString::new(line_strings, coord_type).into())
            }
            WkbGeometryType::MultiPolygon => {
                let polygons = self.read_children(endianness, |child| match child {
                    Geometry::Polygon(polygon) => Ok(polygon),
                    other => Err(unexpected_child("MultiPolygon", &other)),
                })?;
                Ok(MultiPolygon::new(polygons, coord_type).into())
            }
            WkbGeometryType::GeometryCollection => {
                let geometries = self.read_children(endianness, Ok)?;
                Ok(GeometryCollection::new(geometries, coord_type).into())
            }
        }
    }

    /// Read a count-prefixed run of full child geometries, each with its
    /// own header. A child SRID flag is tolerated and its field
    /// discarded.
    fn read_children<T>(
        &mut self,
        endianness: Endianness,
        extract: impl Fn(Geometry) -> GeoposResult<T>,
    ) -> GeoposResult<Vec<T>> {
        let count = self.read_u32(endianness)? as usize;
        let mut children = Vec::with_capacity(count);
        for _ in 0..count {
            let header = self.read_header()?;
            let child = self.read_body(&header)?;
            children.push(extract(child)?);
        }
        Ok(children)
    }
}

fn unexpected_child(parent: &str, child: &Geometry) -> GeoposError {
    GeoposError::Wkb(format!(
        "unexpected {} child in a {parent}",
        child.type_name()
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::hex;

    #[test]
    fn decode_little_endian_point() {
        // POINT (1 -1), little endian.
        let buf = hex("0101000000000000000000F03F000000000000F0BF");
        let geometry = read_wkb(&buf).unwrap();
        assert_eq!(geometry, Point::new(Position::xy(1.0, -1.0)).into());
    }

    #[test]
    fn truncation_reports_expected_and_available() {
        let buf = hex("0101000000000000000000F03F0000");
        let err = read_wkb(&buf).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected 8 more bytes"), "{message}");
        assert!(message.contains("2 available"), "{message}");
    }

    #[test]
    fn unknown_type_code_is_named() {
        let buf = hex("010900000000000000");
        let err = read_wkb(&buf).unwrap_err();
        assert!(err.to_string().contains("9"), "{err}");
    }

    #[test]
    fn bad_byte_order_marker() {
        let buf = hex("0201000000");
        let err = read_wkb(&buf).unwrap_err();
        assert!(err.to_string().contains("byte order"), "{err}");
    }

    #[test]
    fn srid_agnostic_entry_point_skips_srid() {
        // EWKB: POINT (1 2) with SRID 4326 (0x10E6), little endian.
        let buf = hex("0101000020E6100000000000000000F03F0000000000000040");
        let geometry = read_wkb(&buf).unwrap();
        assert_eq!(geometry, Point::new(Position::xy(1.0, 2.0)).into());

        let (same, srid) = read_ewkb(&buf).unwrap();
        assert_eq!(same, geometry);
        assert_eq!(srid, Some(4326));
    }

    #[test]
    fn ewkb_z_flag_reads_three_doubles() {
        // EWKB: POINT Z (1 2 3), little endian, no SRID.
        let buf = hex(
            "0101000080000000000000F03F00000000000000400000000000000840",
        );
        let (geometry, info) = read_wkb_info(&buf).unwrap();
        assert_eq!(geometry, Point::new(Position::xyz(1.0, 2.0, 3.0)).into());
        assert_eq!(info.flavor, WkbFlavor::Extended);
        assert_eq!(info.srid, None);
    }

    #[test]
    fn nan_point_decodes_as_empty() {
        // ISO POINT with a (NaN, NaN) tuple.
        let buf = hex("0101000000000000000000F87F000000000000F87F");
        let geometry = read_wkb(&buf).unwrap();
        assert_eq!(geometry, Point::empty(CoordinateType::XY).into());
    }
}
