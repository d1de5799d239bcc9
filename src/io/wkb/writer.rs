use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::coord_type::CoordinateType;
use crate::error::GeoposResult;
use crate::geometry::{Geometry, Point};
use crate::io::wkb::common::{type_code, Endianness, WkbFlavor, WkbGeometryType, WkbOptions};
use crate::series::PositionSeries;

/// Encode a geometry to a WKB buffer sized exactly in advance.
pub fn to_wkb(geometry: &Geometry, options: &WkbOptions) -> GeoposResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(wkb_size(geometry, options));
    write_wkb(&mut buf, geometry, options)?;
    Ok(buf)
}

/// Encode a geometry to a writer.
pub fn write_wkb<W: Write>(
    writer: &mut W,
    geometry: &Geometry,
    options: &WkbOptions,
) -> GeoposResult<()> {
    write_geometry(writer, geometry, options, true)
}

/// The exact byte length [`write_wkb`] will produce.
pub fn wkb_size(geometry: &Geometry, options: &WkbOptions) -> usize {
    geometry_size(geometry, srid_for_root(options).is_some())
}

/// The SRID to stamp on the outermost geometry, if the options call for
/// one. Only the extended flavor has a place for it on the wire.
fn srid_for_root(options: &WkbOptions) -> Option<i32> {
    match options.flavor {
        WkbFlavor::Extended => options.srid,
        WkbFlavor::Iso => None,
    }
}

fn geometry_size(geometry: &Geometry, with_srid: bool) -> usize {
    let header = 1 + 4 + if with_srid { 4 } else { 0 };
    let dim = geometry.coord_type().dim();
    let body = match geometry {
        // An empty point still writes one all-NaN tuple.
        Geometry::Point(_) => dim * 8,
        Geometry::LineString(g) => 4 + g.chain().len() * dim * 8,
        Geometry::Polygon(g) => {
            4 + g
                .rings()
                .iter()
                .map(|ring| 4 + ring.len() * dim * 8)
                .sum::<usize>()
        }
        Geometry::MultiPoint(g) => {
            4 + g
                .points()
                .iter()
                .map(|point| geometry_size(&Geometry::Point(point.clone()), false))
                .sum::<usize>()
        }
        Geometry::MultiLineString(g) => {
            4 + g
                .line_strings()
                .iter()
                .map(|line| geometry_size(&Geometry::LineString(line.clone()), false))
                .sum::<usize>()
        }
        Geometry::MultiPolygon(g) => {
            4 + g
                .polygons()
                .iter()
                .map(|polygon| geometry_size(&Geometry::Polygon(polygon.clone()), false))
                .sum::<usize>()
        }
        Geometry::GeometryCollection(g) => {
            4 + g
                .geometries()
                .iter()
                .map(|child| geometry_size(child, false))
                .sum::<usize>()
        }
    };
    header + body
}

fn write_u32<W: Write>(writer: &mut W, endianness: Endianness, value: u32) -> std::io::Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_u32::<BigEndian>(value),
        Endianness::LittleEndian => writer.write_u32::<LittleEndian>(value),
    }
}

fn write_i32<W: Write>(writer: &mut W, endianness: Endianness, value: i32) -> std::io::Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_i32::<BigEndian>(value),
        Endianness::LittleEndian => writer.write_i32::<LittleEndian>(value),
    }
}

fn write_f64<W: Write>(writer: &mut W, endianness: Endianness, value: f64) -> std::io::Result<()> {
    match endianness {
        Endianness::BigEndian => writer.write_f64::<BigEndian>(value),
        Endianness::LittleEndian => writer.write_f64::<LittleEndian>(value),
    }
}

fn write_header<W: Write>(
    writer: &mut W,
    kind: WkbGeometryType,
    coord_type: CoordinateType,
    options: &WkbOptions,
    is_root: bool,
) -> GeoposResult<()> {
    let srid = if is_root { srid_for_root(options) } else { None };
    writer.write_u8(options.endianness.into())?;
    write_u32(
        writer,
        options.endianness,
        type_code(kind, coord_type, options.flavor, srid.is_some()),
    )?;
    if let Some(srid) = srid {
        write_i32(writer, options.endianness, srid)?;
    }
    Ok(())
}

/// Stream a series as a count-prefixed run of coordinate tuples, coerced
/// to `coord_type`.
fn write_series<W: Write>(
    writer: &mut W,
    series: &PositionSeries,
    coord_type: CoordinateType,
    options: &WkbOptions,
) -> GeoposResult<()> {
    write_u32(writer, options.endianness, series.len() as u32)?;
    for value in series.values_by_type(coord_type) {
        write_f64(writer, options.endianness, value)?;
    }
    Ok(())
}

fn write_point_body<W: Write>(
    writer: &mut W,
    point: &Point,
    options: &WkbOptions,
) -> GeoposResult<()> {
    match point.position() {
        Some(position) => {
            for n in 0..point.coord_type().dim() {
                write_f64(writer, options.endianness, position.value_at(n))?;
            }
        }
        None => {
            for _ in 0..point.coord_type().dim() {
                write_f64(writer, options.endianness, f64::NAN)?;
            }
        }
    }
    Ok(())
}

fn write_geometry<W: Write>(
    writer: &mut W,
    geometry: &Geometry,
    options: &WkbOptions,
    is_root: bool,
) -> GeoposResult<()> {
    let coord_type = geometry.coord_type();
    match geometry {
        Geometry::Point(g) => {
            write_header(writer, WkbGeometryType::Point, coord_type, options, is_root)?;
            write_point_body(writer, g, options)?;
        }
        Geometry::LineString(g) => {
            write_header(
                writer,
                WkbGeometryType::LineString,
                coord_type,
                options,
                is_root,
            )?;
            write_series(writer, g.chain(), coord_type, options)?;
        }
        Geometry::Polygon(g) => {
            write_header(
                writer,
                WkbGeometryType::Polygon,
                coord_type,
                options,
                is_root,
            )?;
            write_u32(writer, options.endianness, g.rings().len() as u32)?;
            for ring in g.rings() {
                write_series(writer, ring, coord_type, options)?;
            }
        }
        Geometry::MultiPoint(g) => {
            write_header(
                writer,
                WkbGeometryType::MultiPoint,
                coord_type,
                options,
                is_root,
            )?;
            write_u32(writer, options.endianness, g.points().len() as u32)?;
            for point in g.points() {
                write_geometry(writer, &Geometry::Point(point.clone()), options, false)?;
            }
        }
        Geometry::MultiLineString(g) => {
            write_header(
                writer,
                WkbGeometryType::MultiLineString,
                coord_type,
                options,
                is_root,
            )?;
            write_u32(writer, options.endianness, g.line_strings().len() as u32)?;
            for line in g.line_strings() {
                write_geometry(writer, &Geometry::LineString(line.clone()), options, false)?;
            }
        }
        Geometry::MultiPolygon(g) => {
            write_header(
                writer,
                WkbGeometryType::MultiPolygon,
                coord_type,
                options,
                is_root,
            )?;
            write_u32(writer, options.endianness, g.polygons().len() as u32)?;
            for polygon in g.polygons() {
                write_geometry(writer, &Geometry::Polygon(polygon.clone()), options, false)?;
            }
        }
        Geometry::GeometryCollection(g) => {
            write_header(
                writer,
                WkbGeometryType::GeometryCollection,
                coord_type,
                options,
                is_root,
            )?;
            write_u32(writer, options.endianness, g.geometries().len() as u32)?;
            for child in g.geometries() {
                write_geometry(writer, child, options, false)?;
            }
        }
    }
    Ok(())
}
