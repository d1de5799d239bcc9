use crate::algorithm::area::signed_area;
use crate::geometry::{Geometry, Polygon};
use crate::position::Position;
use crate::series::PositionSeries;

/// Relative threshold under which a summed area counts as cancelled and
/// the centroid falls back to the next formula down the ladder.
const AREA_CANCEL_EPSILON: f64 = 1e-10;

/// The dimensionality a measure or centroid formula applies to,
/// independent of the nominal geometry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    /// Isolated positions; the arithmetic-mean formula.
    Punctual,
    /// Chains of segments; the length-weighted midpoint formula.
    Linear,
    /// Ring-bounded surfaces; the area-weighted formula.
    Areal,
}

/// The planar centroid of a series under a requested dimensionality.
///
/// The formula degrades when the requested one is meaningless for the
/// data: an areal request on a ring with zero net area (collinear
/// positions) falls back to the linear formula, and a zero-length chain
/// (coincident positions) falls back further to the punctual mean.
/// Returns `None` only for an empty series.
pub fn centroid_of_series(
    series: &PositionSeries,
    dimensionality: Dimensionality,
) -> Option<Position> {
    let mut accumulator = CentroidAccumulator::default();
    match dimensionality {
        Dimensionality::Punctual => accumulator.add_positions(series),
        Dimensionality::Linear => accumulator.add_chain(series),
        Dimensionality::Areal => accumulator.add_ring(series, 1.0),
    }
    accumulator.result()
}

/// The planar centroid of a geometry, dispatching on the dimensionality
/// its variant implies.
pub fn centroid(geometry: &Geometry) -> Option<Position> {
    match geometry {
        Geometry::Point(g) => g.position().map(|pos| Position::xy(pos.x(), pos.y())),
        Geometry::MultiPoint(g) => {
            let mut accumulator = CentroidAccumulator::default();
            for point in g.points() {
                if let Some(pos) = point.position() {
                    accumulator.add_position(pos.x(), pos.y());
                }
            }
            accumulator.result()
        }
        Geometry::LineString(g) => centroid_of_series(g.chain(), Dimensionality::Linear),
        Geometry::MultiLineString(g) => {
            let mut accumulator = CentroidAccumulator::default();
            for line in g.line_strings() {
                accumulator.add_chain(line.chain());
            }
            accumulator.result()
        }
        Geometry::Polygon(g) => polygon_centroid(g),
        Geometry::MultiPolygon(g) => {
            let mut accumulator = CentroidAccumulator::default();
            for polygon in g.polygons() {
                accumulate_polygon(&mut accumulator, polygon);
            }
            if accumulator.area_cancelled() {
                // Degenerate total area; defer to the first member that
                // can answer for itself.
                return g.polygons().iter().find_map(polygon_centroid);
            }
            accumulator.result()
        }
        Geometry::GeometryCollection(g) => {
            let mut accumulator = CentroidAccumulator::default();
            for child in g.geometries() {
                accumulate_geometry(&mut accumulator, child);
            }
            accumulator.result()
        }
    }
}

/// Areal centroid with holes subtracted by their own signed weight; a
/// hole that nearly cancels the exterior falls back to the exterior
/// ring's own centroid.
fn polygon_centroid(polygon: &Polygon) -> Option<Position> {
    let exterior = polygon.exterior()?;
    let mut accumulator = CentroidAccumulator::default();
    accumulate_polygon(&mut accumulator, polygon);
    if accumulator.area_cancelled() {
        return centroid_of_series(exterior, Dimensionality::Areal);
    }
    accumulator.result()
}

fn accumulate_polygon(accumulator: &mut CentroidAccumulator, polygon: &Polygon) {
    for (i, ring) in polygon.rings().iter().enumerate() {
        let weight = if i == 0 { 1.0 } else { -1.0 };
        accumulator.add_ring(ring, weight);
    }
}

fn accumulate_geometry(accumulator: &mut CentroidAccumulator, geometry: &Geometry) {
    match geometry {
        Geometry::Point(g) => {
            if let Some(pos) = g.position() {
                accumulator.add_position(pos.x(), pos.y());
            }
        }
        Geometry::MultiPoint(g) => {
            for point in g.points() {
                if let Some(pos) = point.position() {
                    accumulator.add_position(pos.x(), pos.y());
                }
            }
        }
        Geometry::LineString(g) => accumulator.add_chain(g.chain()),
        Geometry::MultiLineString(g) => {
            for line in g.line_strings() {
                accumulator.add_chain(line.chain());
            }
        }
        Geometry::Polygon(g) => accumulate_polygon(accumulator, g),
        Geometry::MultiPolygon(g) => {
            for polygon in g.polygons() {
                accumulate_polygon(accumulator, polygon);
            }
        }
        Geometry::GeometryCollection(g) => {
            for child in g.geometries() {
                accumulate_geometry(accumulator, child);
            }
        }
    }
}

/// Accumulates punctual, linear and areal contributions at once and
/// answers with the highest dimensionality that did not degenerate.
#[derive(Debug, Default)]
struct CentroidAccumulator {
    count: usize,
    sum_x: f64,
    sum_y: f64,
    length: f64,
    length_x: f64,
    length_y: f64,
    area: f64,
    abs_area: f64,
    area_x: f64,
    area_y: f64,
}

impl CentroidAccumulator {
    fn add_position(&mut self, x: f64, y: f64) {
        self.count += 1;
        self.sum_x += x;
        self.sum_y += y;
    }

    fn add_positions(&mut self, series: &PositionSeries) {
        for pos in series.positions() {
            self.add_position(pos.x(), pos.y());
        }
    }

    fn add_chain(&mut self, chain: &PositionSeries) {
        let positions: Vec<Position> = chain.positions().collect();
        for pair in positions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let length = (b.x() - a.x()).hypot(b.y() - a.y());
            self.length += length;
            self.length_x += length * (a.x() + b.x()) / 2.0;
            self.length_y += length * (a.y() + b.y()) / 2.0;
        }
        self.add_positions(chain);
    }

    /// Add a ring with `weight_sign` +1 for an exterior, -1 for a hole.
    /// The effective weight is the sign times the ring's own unsigned
    /// area, so ring winding does not matter to the caller.
    fn add_ring(&mut self, ring: &PositionSeries, weight_sign: f64) {
        let ring_area = signed_area(ring);
        if ring_area != 0.0 {
            let positions: Vec<Position> = ring.positions().collect();
            let n = positions.len();
            let mut cx = 0.0;
            let mut cy = 0.0;
            for i in 0..n {
                let a = &positions[i];
                let b = &positions[(i + 1) % n];
                let cross = a.x() * b.y() - b.x() * a.y();
                cx += (a.x() + b.x()) * cross;
                cy += (a.y() + b.y()) * cross;
            }
            cx /= 6.0 * ring_area;
            cy /= 6.0 * ring_area;
            let weight = weight_sign * ring_area.abs();
            self.area += weight;
            self.abs_area += weight.abs();
            self.area_x += weight * cx;
            self.area_y += weight * cy;
        }
        // Linear and punctual terms back up the areal one in case every
        // ring degenerates.
        self.add_chain(ring);
        if !ring.is_closed_2d() {
            if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                let length = (last.x() - first.x()).hypot(last.y() - first.y());
                self.length += length;
                self.length_x += length * (first.x() + last.x()) / 2.0;
                self.length_y += length * (first.y() + last.y()) / 2.0;
            }
        }
    }

    fn area_cancelled(&self) -> bool {
        self.abs_area == 0.0 || self.area.abs() <= AREA_CANCEL_EPSILON * self.abs_area
    }

    fn result(&self) -> Option<Position> {
        if !self.area_cancelled() {
            return Some(Position::xy(self.area_x / self.area, self.area_y / self.area));
        }
        if self.length > 0.0 {
            return Some(Position::xy(
                self.length_x / self.length,
                self.length_y / self.length,
            ));
        }
        if self.count > 0 {
            return Some(Position::xy(
                self.sum_x / self.count as f64,
                self.sum_y / self.count as f64,
            ));
        }
        None
    }
}
