//! The binary codec (WKB and its SRID-carrying extension EWKB).
//!
//! Layout per geometry: a 1-byte byte-order marker, a 4-byte type code,
//! an optional 4-byte SRID (extended flavor only), then the payload — a
//! coordinate tuple of `dim × 8`-byte doubles for a point, or a 4-byte
//! count followed by that many tuples or child geometries. Dimensionality
//! rides on the type code, either as the ISO +1000/+2000/+3000 offsets or
//! as the extended high flag bits.
//!
//! Encoding mirrors decoding exactly: re-encoding a decode with the
//! options reported by [`read_wkb_info`] reproduces the input byte for
//! byte, for every endianness, flavor and SRID combination.

mod common;
mod reader;
mod writer;

pub use common::{
    Endianness, WkbFlavor, WkbGeometryType, WkbOptions, EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG,
};
pub use reader::{read_ewkb, read_wkb, read_wkb_info, WkbInfo};
pub use writer::{to_wkb, wkb_size, write_wkb};
