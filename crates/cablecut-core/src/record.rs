//! Loose-record parsing: builds a [`SegmentStore`] from raw route-feed rows.
//!
//! Route-position tables accumulated over years of surveys do not agree on
//! field names: the same logical column appears under different keys in
//! different segments' tables. Each logical field therefore has an ordered
//! list of accessor keys, evaluated first-match-wins. The distance
//! alternates differ per cable family and come from
//! [`CableFamily::distance_keys`](crate::family::CableFamily::distance_keys);
//! the coordinate and depth alternates are shared.
//!
//! The build is pure: no I/O, no shared state, same output for same input.
//! Rows without a usable distance are dropped (not an error); malformed
//! optional fields silently become `None`.

use serde_json::Value;

use crate::types::{CoordPoint, RoutePoint, SegmentStore};

/// Latitude accessor keys, in priority order.
pub const LAT_KEYS: &[&str] = &["full_latitude", "decimal_latitude", "latitude"];

/// Longitude accessor keys, in priority order.
pub const LNG_KEYS: &[&str] = &["full_longitude", "decimal_longitude", "longitude"];

/// Depth accessor keys, in priority order. The capitalized `Depth`
/// really does come first in some source tables.
pub const DEPTH_KEYS: &[&str] = &["Depth", "depth", "approx_depth"];

/// Cable-type accessor key (a single name across all tables).
pub const CABLE_TYPE_KEY: &str = "cable_type";

/// Parse a JSON value as a finite float.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace
/// ignored). Returns `None` for anything else, including non-finite
/// values.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Resolve a numeric field by trying `keys` in order, first match wins.
#[must_use]
pub fn field_number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| record.get(key).and_then(parse_number))
}

/// Resolve the cable-type label: a non-empty string after trimming.
#[must_use]
pub fn field_cable_type(record: &Value) -> Option<String> {
    let raw = record.get(CABLE_TYPE_KEY)?.as_str()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Build one segment's [`SegmentStore`] from raw feed rows.
///
/// `distance_keys` is the family's ordered list of distance accessor
/// names. Rows yielding no finite distance are excluded; rows with a
/// distance but no usable coordinate join `meta` only. Both lists come
/// back sorted ascending by `km`.
#[must_use]
pub fn build_segment(rows: &[Value], distance_keys: &[&str]) -> SegmentStore {
    let mut meta: Vec<RoutePoint> = rows
        .iter()
        .filter_map(|row| {
            let km = field_number(row, distance_keys)?;
            Some(RoutePoint {
                km,
                lat: field_number(row, LAT_KEYS),
                lng: field_number(row, LNG_KEYS),
                depth: field_number(row, DEPTH_KEYS),
                cable_type: field_cable_type(row),
            })
        })
        .collect();

    let mut coords: Vec<CoordPoint> = meta
        .iter()
        .filter_map(|p| {
            Some(CoordPoint {
                km: p.km,
                lat: p.lat?,
                lng: p.lng?,
                depth: p.depth,
            })
        })
        .collect();

    meta.sort_by(|a, b| a.km.total_cmp(&b.km));
    coords.sort_by(|a, b| a.km.total_cmp(&b.km));

    SegmentStore { meta, coords }
}
