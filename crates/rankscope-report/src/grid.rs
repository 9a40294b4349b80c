//! Sample-point grid around the business and the queries run at each point.
//!
//! Offsets are computed in miles then converted to degrees. The longitude
//! offset widens with latitude so physical spacing stays ~equal.

use std::f64::consts::PI;

use rankscope_core::{Coordinates, GridPoint, ZoneId};

const MILES_PER_LAT_DEGREE: f64 = 69.0;

/// Radius used when the report input does not specify one.
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// Strategy for placing a report's sample points.
///
/// `points` must return the same number of points, in the same zone order,
/// for every call; row-major order with `columns` points per row.
pub trait ZoneLayout: Send + Sync {
    fn points(&self, center: Coordinates, radius_miles: f64) -> Vec<GridPoint>;

    /// Points per display row.
    fn columns(&self) -> usize;
}

/// 2×2 layout with one point per compass quadrant, half the radius out.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadrantLayout;

const QUADRANTS: [(&str, f64, f64); 4] = [
    // (zone, north sign, east sign), row-major from the north-west.
    ("NW", 1.0, -1.0),
    ("NE", 1.0, 1.0),
    ("SW", -1.0, -1.0),
    ("SE", -1.0, 1.0),
];

impl ZoneLayout for QuadrantLayout {
    fn points(&self, center: Coordinates, radius_miles: f64) -> Vec<GridPoint> {
        let step = radius_miles / 2.0;
        QUADRANTS
            .iter()
            .map(|(zone, north, east)| {
                let (lat, lng) = offset(center, north * step, east * step);
                GridPoint {
                    lat,
                    lng,
                    zone: ZoneId::new(*zone),
                }
            })
            .collect()
    }

    fn columns(&self) -> usize {
        2
    }
}

/// `side × side` layout: the square of half-width `radius` split into equal
/// cells, one point at each cell center. Zones are labelled `R{row}C{col}`.
#[derive(Debug, Clone, Copy)]
pub struct SquareLayout {
    side: usize,
}

impl SquareLayout {
    #[must_use]
    pub fn new(side: usize) -> Self {
        Self { side: side.max(1) }
    }
}

impl ZoneLayout for SquareLayout {
    #[allow(clippy::cast_precision_loss)]
    fn points(&self, center: Coordinates, radius_miles: f64) -> Vec<GridPoint> {
        let n = self.side as f64;
        let cell_offset = |i: usize| -radius_miles + radius_miles * (2.0 * i as f64 + 1.0) / n;

        let mut points = Vec::with_capacity(self.side * self.side);
        for row in 0..self.side {
            for col in 0..self.side {
                // Row 0 is the northern edge.
                let north = -cell_offset(row);
                let east = cell_offset(col);
                let (lat, lng) = offset(center, north, east);
                points.push(GridPoint {
                    lat,
                    lng,
                    zone: ZoneId::new(format!("R{row}C{col}")),
                });
            }
        }
        points
    }

    fn columns(&self) -> usize {
        self.side
    }
}

fn offset(center: Coordinates, north_miles: f64, east_miles: f64) -> (f64, f64) {
    let lat = center.lat + north_miles / MILES_PER_LAT_DEGREE;
    let lng = center.lng + east_miles / (MILES_PER_LAT_DEGREE * (center.lat * PI / 180.0).cos());
    (lat, lng)
}

/// Builds one `"{keyword} near {address}"` query per keyword.
///
/// Only the first non-blank keyword is used unless `all_keywords` is set;
/// every extra keyword costs one more search per zone.
#[must_use]
pub fn generate_queries(keywords: &[String], address: &str, all_keywords: bool) -> Vec<String> {
    let address = address.trim();
    let usable = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| format!("{k} near {address}"));

    if all_keywords {
        usable.collect()
    } else {
        usable.take(1).collect()
    }
}
