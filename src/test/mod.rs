//! Shared geometry fixtures for unit tests across modules.

use crate::coord_type::CoordinateType;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::position::Position;
use crate::series::PositionSeries;

/// Decode a hex string into bytes.
pub(crate) fn hex(s: &str) -> Vec<u8> {
    assert!(s.len() % 2 == 0, "odd hex string length");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

const ALL_COORD_TYPES: [CoordinateType; 4] = [
    CoordinateType::XY,
    CoordinateType::XYZ,
    CoordinateType::XYM,
    CoordinateType::XYZM,
];

/// Build a series of `coord_type` from 4-component tuples, keeping the
/// leading `dim` values of each.
pub(crate) fn series(coord_type: CoordinateType, tuples: &[[f64; 4]]) -> PositionSeries {
    let mut values = Vec::new();
    for tuple in tuples {
        values.extend_from_slice(&tuple[..coord_type.dim()]);
    }
    PositionSeries::view(values, coord_type)
}

fn position(coord_type: CoordinateType, tuple: [f64; 4]) -> Position {
    Position::from_components(&tuple[..coord_type.dim()], coord_type)
}

fn polygon(coord_type: CoordinateType) -> Polygon {
    let exterior = series(
        coord_type,
        &[
            [0.0, 0.0, 1.0, 10.0],
            [8.0, 0.0, 2.0, 11.0],
            [8.0, 8.0, 3.0, 12.0],
            [0.0, 8.0, 4.0, 13.0],
            [0.0, 0.0, 1.0, 10.0],
        ],
    );
    let hole = series(
        coord_type,
        &[
            [1.0, 1.0, 0.5, 1.0],
            [3.0, 1.0, 0.5, 2.0],
            [3.0, 3.0, 0.5, 3.0],
            [1.0, 3.0, 0.5, 4.0],
            [1.0, 1.0, 0.5, 1.0],
        ],
    );
    Polygon::new(vec![exterior, hole], coord_type).unwrap()
}

/// One geometry per variant and coordinate type, plus empty forms —
/// the matrix the codec round-trip tests sweep.
pub(crate) fn all_fixtures() -> Vec<Geometry> {
    let mut fixtures = Vec::new();
    for ct in ALL_COORD_TYPES {
        fixtures.push(Point::new(position(ct, [30.0, 10.5, -2.0, 7.25])).into());
        fixtures.push(Point::empty(ct).into());

        fixtures.push(
            LineString::new(series(
                ct,
                &[
                    [0.0, 0.0, 1.0, 0.0],
                    [2.5, 3.0, 2.0, 1.0],
                    [-4.0, 1.0, 3.0, 2.0],
                ],
            ))
            .into(),
        );
        fixtures.push(LineString::empty(ct).into());

        fixtures.push(polygon(ct).into());
        fixtures.push(Polygon::empty(ct).into());

        fixtures.push(
            MultiPoint::new(
                vec![
                    Point::new(position(ct, [10.0, 40.0, 1.0, 2.0])),
                    Point::new(position(ct, [40.0, 30.0, 2.0, 3.0])),
                ],
                ct,
            )
            .into(),
        );

        fixtures.push(
            MultiLineString::new(
                vec![
                    LineString::new(series(
                        ct,
                        &[[10.0, 10.0, 0.0, 0.0], [20.0, 20.0, 1.0, 1.0]],
                    )),
                    LineString::new(series(
                        ct,
                        &[[40.0, 40.0, 2.0, 2.0], [30.0, 30.0, 3.0, 3.0]],
                    )),
                ],
                ct,
            )
            .into(),
        );

        fixtures.push(MultiPolygon::new(vec![polygon(ct)], ct).into());
        fixtures.push(MultiPolygon::empty(ct).into());

        fixtures.push(
            GeometryCollection::new(
                vec![
                    Point::new(position(ct, [1.0, 2.0, 3.0, 4.0])).into(),
                    LineString::new(series(ct, &[[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]]))
                        .into(),
                ],
                ct,
            )
            .into(),
        );
        fixtures.push(GeometryCollection::empty(ct).into());
    }
    // A multi point with an empty member keeps the member on the wire.
    fixtures.push(
        MultiPoint::new(
            vec![
                Point::new(Position::xy(1.0, 2.0)),
                Point::empty(CoordinateType::XY),
            ],
            CoordinateType::XY,
        )
        .into(),
    );
    fixtures
}
