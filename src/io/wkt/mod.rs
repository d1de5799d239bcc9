//! The text codec (WKT and its SRID-prefixed extension EWKT).
//!
//! Grammar: `geometry := TYPENAME ['Z'|'M'|'ZM'] ('EMPTY' |
//! coordinate-group)`, with a coordinate group nesting per type.
//! Tokenizing tolerates arbitrary whitespace, case-insensitive keywords,
//! attached dimension suffixes (`POINTZM`), and an optional leading
//! `SRID=<int>;` prefix. Emptiness and dimensionality are orthogonal:
//! `POINT ZM EMPTY` decodes to an empty geometry whose coordinate type
//! is XYZM.
//!
//! Round trip: re-encoding a parse yields the canonical form, which
//! differs from the input only in whitespace and case — never in numeric
//! values or structure.

mod reader;
mod token;
mod writer;

pub use reader::{parse_ewkt, parse_wkt};
pub use writer::{to_ewkt, to_wkt};
