use crate::coord_type::CoordinateType;
use crate::error::{GeoposError, GeoposResult};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::io::wkt::token::{tokenize, Token};
use crate::position::Position;
use crate::series::PositionSeries;

/// Parse a WKT (or EWKT) string. An `SRID=<int>;` prefix is accepted and
/// discarded; use [`parse_ewkt`] to capture it.
pub fn parse_wkt(text: &str) -> GeoposResult<Geometry> {
    Ok(parse_ewkt(text)?.0)
}

/// Parse an EWKT string, surfacing the optional leading SRID.
pub fn parse_ewkt(text: &str) -> GeoposResult<(Geometry, Option<i32>)> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
    };
    let srid = parser.parse_srid_prefix()?;
    let geometry = parser.parse_geometry()?;
    parser.expect_end()?;
    Ok((geometry, srid))
}

const TYPE_NAMES: [&str; 7] = [
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
];

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> GeoposResult<&Token> {
        let token = self.tokens.get(self.pos).ok_or_else(|| {
            GeoposError::Wkt("unexpected end of input".to_string())
        })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token, context: &str) -> GeoposResult<()> {
        let token = self.next()?;
        if token != expected {
            return Err(GeoposError::Wkt(format!(
                "expected {expected:?} {context}, found {token:?}"
            )));
        }
        Ok(())
    }

    fn expect_end(&self) -> GeoposResult<()> {
        if self.pos != self.tokens.len() {
            return Err(GeoposError::Wkt(format!(
                "unexpected trailing input: {:?}",
                self.tokens[self.pos]
            )));
        }
        Ok(())
    }

    /// Consume a `Word(word)` if it is next.
    fn take_word(&mut self, word: &str) -> bool {
        if matches!(self.peek(), Some(Token::Word(w)) if w == word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_srid_prefix(&mut self) -> GeoposResult<Option<i32>> {
        if !self.take_word("SRID") {
            return Ok(None);
        }
        self.expect(&Token::Equals, "after SRID")?;
        let srid = match self.next()? {
            Token::Number(n) if n.fract() == 0.0 => *n as i32,
            token => {
                return Err(GeoposError::Wkt(format!(
                    "expected an integer SRID, found {token:?}"
                )));
            }
        };
        self.expect(&Token::Semicolon, "after the SRID value")?;
        Ok(Some(srid))
    }

    fn parse_geometry(&mut self) -> GeoposResult<Geometry> {
        let word = match self.next()? {
            Token::Word(word) => word.clone(),
            token => {
                return Err(GeoposError::Wkt(format!(
                    "expected a geometry type keyword, found {token:?}"
                )));
            }
        };
        let (name, mut declared) = split_type_word(&word)?;
        if declared.is_none() {
            declared = self.parse_dimension_token();
        }
        match name {
            "POINT" => Ok(self.parse_point(declared)?.into()),
            "LINESTRING" => Ok(self.parse_line_string(declared)?.into()),
            "POLYGON" => Ok(self.parse_polygon(declared)?.into()),
            "MULTIPOINT" => Ok(self.parse_multi_point(declared)?.into()),
            "MULTILINESTRING" => Ok(self.parse_multi_line_string(declared)?.into()),
            "MULTIPOLYGON" => Ok(self.parse_multi_polygon(declared)?.into()),
            "GEOMETRYCOLLECTION" => Ok(self.parse_collection(declared)?.into()),
            _ => unreachable!("split_type_word only returns known names"),
        }
    }

    /// A standalone `Z`/`M`/`ZM` dimension token after the type name.
    fn parse_dimension_token(&mut self) -> Option<CoordinateType> {
        for (word, ct) in [
            ("ZM", CoordinateType::XYZM),
            ("Z", CoordinateType::XYZ),
            ("M", CoordinateType::XYM),
        ] {
            if self.take_word(word) {
                return Some(ct);
            }
        }
        None
    }

    fn parse_point(&mut self, declared: Option<CoordinateType>) -> GeoposResult<Point> {
        if self.take_word("EMPTY") {
            return Ok(Point::empty(declared.unwrap_or(CoordinateType::XY)));
        }
        self.expect(&Token::LParen, "to open a POINT")?;
        let values = self.parse_tuple_values()?;
        self.expect(&Token::RParen, "to close a POINT")?;
        let coord_type = resolve_arity(declared, values.len())?;
        Ok(Point::new(Position::from_components(&values, coord_type)))
    }

    fn parse_line_string(&mut self, declared: Option<CoordinateType>) -> GeoposResult<LineString> {
        if self.take_word("EMPTY") {
            return Ok(LineString::empty(declared.unwrap_or(CoordinateType::XY)));
        }
        self.expect(&Token::LParen, "to open a LINESTRING")?;
        let chain = self.parse_series(declared)?;
        self.expect(&Token::RParen, "to close a LINESTRING")?;
        Ok(LineString::new(chain))
    }

    fn parse_polygon(&mut self, declared: Option<CoordinateType>) -> GeoposResult<Polygon> {
        if self.take_word("EMPTY") {
            return Ok(Polygon::empty(declared.unwrap_or(CoordinateType::XY)));
        }
        self.expect(&Token::LParen, "to open a POLYGON")?;
        let rings = self.parse_ring_list(declared)?;
        self.expect(&Token::RParen, "to close a POLYGON")?;
        let coord_type = rings
            .first()
            .map(PositionSeries::coord_type)
            .or(declared)
            .unwrap_or(CoordinateType::XY);
        Polygon::new(rings, coord_type)
    }

    /// Comma-separated parenthesized rings; the first ring fixes the
    /// coordinate type the others must match.
    fn parse_ring_list(
        &mut self,
        mut declared: Option<CoordinateType>,
    ) -> GeoposResult<Vec<PositionSeries>> {
        let mut rings = Vec::new();
        loop {
            if self.take_word("EMPTY") {
                rings.push(PositionSeries::empty(
                    declared.unwrap_or(CoordinateType::XY),
                ));
            } else {
                self.expect(&Token::LParen, "to open a ring")?;
                let ring = self.parse_series(declared)?;
                self.expect(&Token::RParen, "to close a ring")?;
                declared = Some(ring.coord_type());
                rings.push(ring);
            }
            if !self.take_comma() {
                return Ok(rings);
            }
        }
    }

    fn parse_multi_point(&mut self, declared: Option<CoordinateType>) -> GeoposResult<MultiPoint> {
        if self.take_word("EMPTY") {
            return Ok(MultiPoint::empty(declared.unwrap_or(CoordinateType::XY)));
        }
        self.expect(&Token::LParen, "to open a MULTIPOINT")?;
        let mut declared = declared;
        let mut points = Vec::new();
        loop {
            if self.take_word("EMPTY") {
                points.push(Point::empty(declared.unwrap_or(CoordinateType::XY)));
            } else {
                // Tolerate both `(10 40)` and the bare `10 40` form.
                let parenthesized = matches!(self.peek(), Some(Token::LParen));
                if parenthesized {
                    self.pos += 1;
                }
                let values = self.parse_tuple_values()?;
                if parenthesized {
                    self.expect(&Token::RParen, "to close a MULTIPOINT member")?;
                }
                let coord_type = resolve_arity(declared, values.len())?;
                declared = Some(coord_type);
                points.push(Point::new(Position::from_components(&values, coord_type)));
            }
            if !self.take_comma() {
                break;
            }
        }
        self.expect(&Token::RParen, "to close a MULTIPOINT")?;
        let coord_type = declared.unwrap_or(CoordinateType::XY);
        Ok(MultiPoint::new(points, coord_type))
    }

    fn parse_multi_line_string(
        &mut self,
        declared: Option<CoordinateType>,
    ) -> GeoposResult<MultiLineString> {
        if self.take_word("EMPTY") {
            return Ok(MultiLineString::empty(
                declared.unwrap_or(CoordinateType::XY),
            ));
        }
        self.expect(&Token::LParen, "to open a MULTILINESTRING")?;
        let mut declared = declared;
        let mut line_strings = Vec::new();
        loop {
            if self.take_word("EMPTY") {
                line_strings.push(LineString::empty(declared.unwrap_or(CoordinateType::XY)));
            } else {
                self.expect(&Token::LParen, "to open a MULTILINESTRING member")?;
                let chain = self.parse_series(declared)?;
                self.expect(&Token::RParen, "to close a MULTILINESTRING member")?;
                declared = Some(chain.coord_type());
                line_strings.push(LineString::new(chain));
            }
            if !self.take_comma() {
                break;
            }
        }
        self.expect(&Token::RParen, "to close a MULTILINESTRING")?;
        let coord_type = declared.unwrap_or(CoordinateType::XY);
        Ok(MultiLineString::new(line_strings, coord_type))
    }

    fn parse_multi_polygon(
        &mut self,
        declared: Option<CoordinateType>,
    ) -> GeoposResult<MultiPolygon> {
        if self.take_word("EMPTY") {
            return Ok(MultiPolygon::empty(declared.unwrap_or(CoordinateType::XY)));
        }
        self.expect(&Token::LParen, "to open a MULTIPOLYGON")?;
        let mut declared = declared;
        let mut polygons = Vec::new();
        loop {
            if self.take_word("EMPTY") {
                polygons.push(Polygon::empty(declared.unwrap_or(CoordinateType::XY)));
            } else {
                self.expect(&Token::LParen, "to open a MULTIPOLYGON member")?;
                let rings = self.parse_ring_list(declared)?;
                self.expect(&Token::RParen, "to close a MULTIPOLYGON member")?;
                let coord_type = rings
                    .first()
                    .map(PositionSeries::coord_type)
                    .or(declared)
                    .unwrap_or(CoordinateType::XY);
                declared = Some(coord_type);
                polygons.push(Polygon::new(rings, coord_type)?);
            }
            if !self.take_comma() {
                break;
            }
        }
        self.expect(&Token::RParen, "to close a MULTIPOLYGON")?;
        let coord_type = declared.unwrap_or(CoordinateType::XY);
        Ok(MultiPolygon::new(polygons, coord_type))
    }

    fn parse_collection(
        &mut self,
        declared: Option<CoordinateType>,
    ) -> GeoposResult<GeometryCollection> {
        if self.take_word("EMPTY") {
            return Ok(GeometryCollection::empty(
                declared.unwrap_or(CoordinateType::XY),
            ));
        }
        self.expect(&Token::LParen, "to open a GEOMETRYCOLLECTION")?;
        let mut geometries = Vec::new();
        loop {
            geometries.push(self.parse_geometry()?);
            if !self.take_comma() {
                break;
            }
        }
        self.expect(&Token::RParen, "to close a GEOMETRYCOLLECTION")?;
        let coord_type = declared
            .or_else(|| geometries.first().map(Geometry::coord_type))
            .unwrap_or(CoordinateType::XY);
        Ok(GeometryCollection::new(geometries, coord_type))
    }

    /// Comma-separated tuples with a consistent arity, as a flat series.
    fn parse_series(
        &mut self,
        declared: Option<CoordinateType>,
    ) -> GeoposResult<PositionSeries> {
        let first = self.parse_tuple_values()?;
        let coord_type = resolve_arity(declared, first.len())?;
        let arity = coord_type.dim();
        let mut values = first;
        while self.take_comma() {
            let tuple = self.parse_tuple_values()?;
            if tuple.len() != arity {
                return Err(GeoposError::Wkt(format!(
                    "inconsistent tuple arity: expected {arity} values per position, found {}",
                    tuple.len()
                )));
            }
            values.extend_from_slice(&tuple);
        }
        Ok(PositionSeries::view(values, coord_type))
    }

    /// One or more consecutive numbers.
    fn parse_tuple_values(&mut self) -> GeoposResult<Vec<f64>> {
        let mut values = Vec::new();
        while let Some(Token::Number(n)) = self.peek() {
            values.push(*n);
            self.pos += 1;
        }
        if values.is_empty() {
            return Err(GeoposError::Wkt(format!(
                "expected a number, found {:?}",
                self.peek()
            )));
        }
        Ok(values)
    }

    fn take_comma(&mut self) -> bool {
        if matches!(self.peek(), Some(Token::Comma)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Split a type keyword with an attached dimension suffix, e.g.
/// `POINTZM`, into its parts.
fn split_type_word(word: &str) -> GeoposResult<(&'static str, Option<CoordinateType>)> {
    for name in TYPE_NAMES {
        if let Some(rest) = word.strip_prefix(name) {
            let declared = match rest {
                "" => None,
                "Z" => Some(CoordinateType::XYZ),
                "M" => Some(CoordinateType::XYM),
                "ZM" => Some(CoordinateType::XYZM),
                _ => continue,
            };
            return Ok((name, declared));
        }
    }
    Err(GeoposError::Wkt(format!(
        "unknown geometry type keyword {word:?}"
    )))
}

/// The coordinate type for a tuple of `arity` values, honoring a
/// declared dimension when there is one. Three bare values resolve to
/// XYZ.
fn resolve_arity(
    declared: Option<CoordinateType>,
    arity: usize,
) -> GeoposResult<CoordinateType> {
    match declared {
        Some(ct) => {
            if arity != ct.dim() {
                return Err(GeoposError::Wkt(format!(
                    "expected {} values per position for {ct}, found {arity}",
                    ct.dim()
                )));
            }
            Ok(ct)
        }
        None => match arity {
            2 => Ok(CoordinateType::XY),
            3 => Ok(CoordinateType::XYZ),
            4 => Ok(CoordinateType::XYZM),
            _ => Err(GeoposError::Wkt(format!(
                "a position needs 2 to 4 values, found {arity}"
            ))),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_loosely_formatted_point() {
        for text in [
            "POINT (30 10)",
            "point(30 10)",
            "  Point  (  30   10 )  ",
        ] {
            let geometry = parse_wkt(text).unwrap();
            assert_eq!(
                geometry,
                Point::new(Position::xy(30.0, 10.0)).into(),
                "{text}"
            );
        }
    }

    #[test]
    fn dimension_markers_and_suffixes() {
        let spaced = parse_wkt("POINT ZM (1 2 3 4)").unwrap();
        let attached = parse_wkt("POINTZM (1 2 3 4)").unwrap();
        assert_eq!(spaced, attached);
        assert_eq!(spaced.coord_type(), CoordinateType::XYZM);

        let measured = parse_wkt("POINT M (1 2 8)").unwrap();
        assert_eq!(measured.coord_type(), CoordinateType::XYM);

        // Three bare values default to XYZ.
        let inferred = parse_wkt("POINT (1 2 3)").unwrap();
        assert_eq!(inferred.coord_type(), CoordinateType::XYZ);
    }

    #[test]
    fn empty_keeps_declared_dimension() {
        let geometry = parse_wkt("POINT ZM EMPTY").unwrap();
        assert_eq!(geometry.coord_type(), CoordinateType::XYZM);
        assert!(geometry.is_empty());

        let line = parse_wkt("LINESTRING Z EMPTY").unwrap();
        assert_eq!(line.coord_type(), CoordinateType::XYZ);
        assert!(line.is_empty());
    }

    #[test]
    fn arity_mismatch_fails() {
        let err = parse_wkt("POINT ZM (1 2 3)").unwrap_err();
        assert!(err.to_string().contains("expected 4"), "{err}");
        assert!(parse_wkt("LINESTRING (1 2, 3 4 5)").is_err());
        assert!(parse_wkt("POINT (1 2 3 4 5)").is_err());
    }

    #[test]
    fn unbalanced_delimiters_fail() {
        assert!(parse_wkt("POINT (1 2").is_err());
        assert!(parse_wkt("POINT 1 2)").is_err());
        assert!(parse_wkt("POLYGON ((0 0, 1 0, 1 1, 0 0)").is_err());
        assert!(parse_wkt("POINT (1 2) garbage").is_err());
    }

    #[test]
    fn srid_prefix() {
        let (geometry, srid) = parse_ewkt("SRID=4326;POINT (5 6)").unwrap();
        assert_eq!(srid, Some(4326));
        assert_eq!(geometry, Point::new(Position::xy(5.0, 6.0)).into());

        // The agnostic entry point accepts and discards it.
        assert!(parse_wkt("SRID=4326;POINT (5 6)").is_ok());
        assert!(parse_ewkt("SRID=x;POINT (1 2)").is_err());
    }

    #[test]
    fn multipoint_accepts_both_member_forms() {
        let bare = parse_wkt("MULTIPOINT (10 40, 40 30)").unwrap();
        let wrapped = parse_wkt("MULTIPOINT ((10 40), (40 30))").unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn polygon_with_hole() {
        let geometry = parse_wkt(
            "POLYGON ((35 10, 45 45, 15 40, 10 20, 35 10), (20 30, 35 35, 30 20, 20 30))",
        )
        .unwrap();
        let Geometry::Polygon(polygon) = geometry else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.rings().len(), 2);
        assert_eq!(polygon.exterior().unwrap().len(), 5);
        assert_eq!(polygon.interiors()[0].len(), 4);
    }

    #[test]
    fn nested_collection() {
        let geometry = parse_wkt(
            "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1), GEOMETRYCOLLECTION (POINT EMPTY))",
        )
        .unwrap();
        let Geometry::GeometryCollection(collection) = geometry else {
            panic!("expected a collection");
        };
        assert_eq!(collection.geometries().len(), 3);
        assert_eq!(collection.coord_type(), CoordinateType::XY);
    }
}
