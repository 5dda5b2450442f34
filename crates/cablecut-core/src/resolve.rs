//! Span resolution: one scalar distance from point A into an owning
//! segment and a local distance within it.

use crate::family::CableFamily;
use crate::graph;
use crate::types::RouteSnapshot;

/// Owner segment for a span distance, with the distance re-based to
/// that segment's local axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSpan {
    pub segment_id: &'static str,
    pub local_km: f64,
}

/// Combined length of every segment on `path`, in km.
#[must_use]
pub fn total_span(snapshot: &RouteSnapshot, path: &[&str]) -> f64 {
    path.iter()
        .map(|id| snapshot.segment_length(id))
        .filter(|len| len.is_finite())
        .sum()
}

/// Pull `target_km` into `[0, total_span]`.
///
/// Out-of-range targets are clamped rather than rejected. Interactive
/// inputs pass through transient out-of-range values constantly, so
/// the boundary value is the useful answer.
#[must_use]
pub fn clamp_target(target_km: f64, total_span: f64) -> f64 {
    if total_span <= 0.0 {
        return 0.0;
    }
    target_km.clamp(0.0, total_span)
}

/// Resolve a clamped span distance to its owning segment.
///
/// Walks the path in order, spending the remainder against each
/// segment's length. Zero-length segments are skipped; the final
/// segment absorbs any floating-point residue. `None` means the start
/// segment is unknown to the family, or the whole path is empty of
/// route data.
#[must_use]
pub fn resolve(
    snapshot: &RouteSnapshot,
    family: &CableFamily,
    start_id: &str,
    end_id: &str,
    target_km: f64,
) -> Option<ResolvedSpan> {
    let path = graph::path_between(family, start_id, end_id);
    resolve_on_path(snapshot, &path, target_km)
}

/// As [`resolve`], over an already-computed path.
#[must_use]
pub fn resolve_on_path(
    snapshot: &RouteSnapshot,
    path: &[&'static str],
    target_km: f64,
) -> Option<ResolvedSpan> {
    if path.is_empty() {
        return None;
    }
    let total = total_span(snapshot, path);
    let bounded = clamp_target(target_km, total);

    if let [only] = *path {
        return Some(ResolvedSpan {
            segment_id: only,
            local_km: bounded,
        });
    }

    let last = path.len() - 1;
    let mut remaining = bounded;
    for (i, segment_id) in path.iter().enumerate() {
        let len = snapshot.segment_length(segment_id);
        if len <= 0.0 {
            continue;
        }
        if remaining <= len || i == last {
            return Some(ResolvedSpan {
                segment_id,
                local_km: remaining,
            });
        }
        remaining -= len;
    }
    None
}
