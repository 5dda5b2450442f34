//! Geographic interpolation along a segment's route-position table.
//!
//! The caller hands in a local distance measured from the span's point
//! A. The table's own km axis may run the other way, so the first step
//! converts the local distance to a lookup key on the native axis,
//! flipping it when the segment is mirrored. Everything after that is
//! a linear scan of the sorted table.

use crate::types::SegmentStore;

/// An estimated position on the route, with whatever metadata the
/// surrounding table rows could supply.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteEstimate {
    /// Local distance for interior hits, the boundary row's native km
    /// when the lookup clamps to either end of the coordinate table.
    pub km: f64,
    pub lat: f64,
    pub lng: f64,
    pub depth: Option<f64>,
    pub cable_type: Option<String>,
}

/// Cable type of the nearest labelled row.
///
/// Ties prefer the row at or after the lookup key: a type-transition
/// row describes the cable starting from its position.
#[must_use]
pub fn nearest_cable_type(store: &SegmentStore, km: f64) -> Option<&str> {
    struct Best<'a> {
        label: &'a str,
        diff: f64,
        forward: bool,
    }

    let mut best: Option<Best<'_>> = None;
    for point in &store.meta {
        let Some(label) = point.cable_type.as_deref() else {
            continue;
        };
        let diff = (point.km - km).abs();
        let forward = point.km >= km;
        let better = best
            .as_ref()
            .is_none_or(|b| diff < b.diff || (diff <= b.diff && forward && !b.forward));
        if better {
            best = Some(Best {
                label,
                diff,
                forward,
            });
        }
    }
    best.map(|b| b.label)
}

/// Depth at the lookup key, linearly interpolated between the nearest
/// depth-bearing rows on either side. One-sided when only one side has
/// depth, `None` when neither does.
#[must_use]
pub fn interpolated_depth(store: &SegmentStore, km: f64) -> Option<f64> {
    let mut prev: Option<(f64, f64)> = None;
    let mut next: Option<(f64, f64)> = None;

    for point in &store.meta {
        let Some(depth) = point.depth.filter(|d| d.is_finite()) else {
            continue;
        };
        if point.km <= km {
            prev = Some((point.km, depth));
        }
        if point.km >= km {
            next = Some((point.km, depth));
            break;
        }
    }

    match (prev, next) {
        (Some((pk, pd)), Some((nk, nd))) => {
            if (nk - pk).abs() < f64::EPSILON {
                Some(pd)
            } else {
                let ratio = (km - pk) / (nk - pk);
                Some(pd + ratio * (nd - pd))
            }
        }
        (_, Some((_, nd))) => Some(nd),
        (Some((_, pd)), _) => Some(pd),
        (None, None) => None,
    }
}

/// Interpolate a point `local_km` into the segment, flipping the axis
/// when `mirrored`.
///
/// Returns `None` when the segment has no coordinate rows at all; a
/// point that cannot be placed on a map is useless downstream.
#[must_use]
pub fn interpolate(store: &SegmentStore, local_km: f64, mirrored: bool) -> Option<RouteEstimate> {
    if store.meta.is_empty() {
        return None;
    }
    let first = store.coords.first()?;
    let last = store.coords.last()?;

    let bounds = store.bounds();
    let clamped = local_km.clamp(0.0, bounds.length);
    let km_lookup = if mirrored {
        bounds.max - clamped
    } else {
        bounds.min + clamped
    };

    let cable_type = nearest_cable_type(store, km_lookup).map(str::to_owned);
    let depth_interp = interpolated_depth(store, km_lookup);

    if km_lookup <= first.km {
        return Some(RouteEstimate {
            km: first.km,
            lat: first.lat,
            lng: first.lng,
            depth: depth_interp.or(first.depth),
            cable_type,
        });
    }
    if km_lookup >= last.km {
        return Some(RouteEstimate {
            km: last.km,
            lat: last.lat,
            lng: last.lng,
            depth: depth_interp.or(last.depth),
            cable_type,
        });
    }

    for pair in store.coords.windows(2) {
        let [prev, curr] = pair else { continue };
        if km_lookup <= curr.km {
            let span = curr.km - prev.km;
            let ratio = if span > 0.0 {
                (km_lookup - prev.km) / span
            } else {
                0.0
            };
            let lat = prev.lat + ratio * (curr.lat - prev.lat);
            let lng = prev.lng + ratio * (curr.lng - prev.lng);
            return Some(RouteEstimate {
                km: local_km,
                lat,
                lng,
                depth: depth_interp.or(prev.depth).or(curr.depth),
                cable_type,
            });
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{CoordPoint, RoutePoint, SegmentStore};

    fn point(km: f64, lat: f64, lng: f64) -> RoutePoint {
        RoutePoint {
            km,
            lat: Some(lat),
            lng: Some(lng),
            depth: None,
            cable_type: None,
        }
    }

    fn store_from(meta: Vec<RoutePoint>) -> SegmentStore {
        let coords = meta
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
        SegmentStore { meta, coords }
    }

    fn straight_line() -> SegmentStore {
        // 0 -> 50 km, lat 0 -> 5, lng 100 -> 105
        store_from(vec![
            point(0.0, 0.0, 100.0),
            point(10.0, 1.0, 101.0),
            point(20.0, 2.0, 102.0),
            point(30.0, 3.0, 103.0),
            point(40.0, 4.0, 104.0),
            point(50.0, 5.0, 105.0),
        ])
    }

    #[test]
    fn interior_lookup_interpolates_linearly() {
        let store = straight_line();
        let hit = interpolate(&store, 25.0, false).unwrap();
        assert!((hit.lat - 2.5).abs() < 1e-9);
        assert!((hit.lng - 102.5).abs() < 1e-9);
        assert!((hit.km - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookups_below_the_first_coord_return_it() {
        let store = straight_line();
        let hit = interpolate(&store, -3.0, false).unwrap();
        assert!((hit.lat - 0.0).abs() < f64::EPSILON);
        assert!((hit.lng - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookups_beyond_the_last_coord_return_it() {
        let store = straight_line();
        let hit = interpolate(&store, 500.0, false).unwrap();
        assert!((hit.lat - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mirrored_lookup_is_an_axis_flip() {
        let store = straight_line();
        for x in [0.0, 7.5, 20.0, 33.3, 50.0] {
            let flipped = interpolate(&store, x, true).unwrap();
            let normal = interpolate(&store, 50.0 - x, false).unwrap();
            assert!((flipped.lat - normal.lat).abs() < 1e-9, "at {x}");
            assert!((flipped.lng - normal.lng).abs() < 1e-9, "at {x}");
        }
    }

    #[test]
    fn mirrored_axis_uses_the_table_maximum_not_zero() {
        // native axis runs 100..120
        let store = store_from(vec![point(100.0, 10.0, 20.0), point(120.0, 12.0, 22.0)]);
        let hit = interpolate(&store, 5.0, true).unwrap();
        // lookup key 115 => three quarters along
        assert!((hit.lat - 11.5).abs() < 1e-9);
    }

    #[test]
    fn sweep_has_no_jump_discontinuity() {
        let store = straight_line();
        let mut last: Option<(f64, f64)> = None;
        let mut x = 0.0;
        while x <= 50.0 {
            let hit = interpolate(&store, x, false).unwrap();
            if let Some((lat, lng)) = last {
                assert!((hit.lat - lat).abs() < 0.06);
                assert!((hit.lng - lng).abs() < 0.06);
            }
            last = Some((hit.lat, hit.lng));
            x += 0.5;
        }
    }

    #[test]
    fn depth_interpolates_across_a_gap() {
        let mut meta = vec![
            point(0.0, 0.0, 0.0),
            point(10.0, 1.0, 1.0),
            point(20.0, 2.0, 2.0),
        ];
        meta[0].depth = Some(100.0);
        meta[2].depth = Some(200.0);
        let store = store_from(meta);
        // the depth-less row at 10 is bridged by its neighbours
        let hit = interpolate(&store, 10.0, false).unwrap();
        assert!((hit.depth.unwrap() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn one_sided_depth_is_used_as_is() {
        let mut meta = vec![point(0.0, 0.0, 0.0), point(10.0, 1.0, 1.0)];
        meta[0].depth = Some(40.0);
        let store = store_from(meta);
        let hit = interpolate(&store, 8.0, false).unwrap();
        assert!((hit.depth.unwrap() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_depth_everywhere_is_none() {
        let store = straight_line();
        assert_eq!(interpolate(&store, 10.0, false).unwrap().depth, None);
    }

    #[test]
    fn cable_type_ties_prefer_the_forward_row() {
        let mut meta = vec![
            point(5.0, 0.5, 0.5),
            point(15.0, 1.5, 1.5),
        ];
        meta[0].cable_type = Some("LW".to_owned());
        meta[1].cable_type = Some("DA".to_owned());
        let store = store_from(meta);
        // both rows sit 5 km from the lookup point
        let hit = interpolate(&store, 10.0, false).unwrap();
        assert_eq!(hit.cable_type.as_deref(), Some("DA"));
    }

    #[test]
    fn nearest_cable_type_skips_unlabelled_rows() {
        let mut meta = vec![
            point(0.0, 0.0, 0.0),
            point(9.0, 0.9, 0.9),
            point(30.0, 3.0, 3.0),
        ];
        meta[2].cable_type = Some("SA".to_owned());
        let store = store_from(meta);
        assert_eq!(nearest_cable_type(&store, 10.0), Some("SA"));
    }

    #[test]
    fn boundary_rows_still_get_computed_metadata() {
        let mut meta = vec![point(0.0, 0.0, 0.0), point(10.0, 1.0, 1.0)];
        meta[1].cable_type = Some("DA".to_owned());
        meta[1].depth = Some(80.0);
        let store = store_from(meta);
        let hit = interpolate(&store, 0.0, false).unwrap();
        // the first row carries neither label nor depth; both come from
        // the scan, not the boundary row itself
        assert_eq!(hit.cable_type.as_deref(), Some("DA"));
        assert!((hit.depth.unwrap() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn segment_without_coordinates_yields_none() {
        let store = store_from(vec![RoutePoint {
            km: 0.0,
            lat: None,
            lng: None,
            depth: Some(10.0),
            cable_type: None,
        }]);
        assert!(interpolate(&store, 0.0, false).is_none());
    }

    #[test]
    fn duplicate_km_rows_stay_finite() {
        let store = store_from(vec![
            point(0.0, 0.0, 0.0),
            point(10.0, 1.0, 1.0),
            point(10.0, 9.0, 9.0),
            point(20.0, 2.0, 2.0),
        ]);
        // the earlier of the duplicate rows wins the bracketing scan
        let hit = interpolate(&store, 10.0, false).unwrap();
        assert!(hit.lat.is_finite());
        assert!((hit.lat - 1.0).abs() < 1e-9);
    }
}
