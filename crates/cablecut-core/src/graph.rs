//! Segment-graph queries over a family's fixed linear ordering.
//!
//! A cable system is a straight line of segments, so a route between
//! any two picks is the contiguous slice of the canonical ordering
//! between them. The other question answered here is orientation:
//! whether a given segment's route table runs opposite to the span's
//! travel direction, per the family's survey mirror table and policy.

use crate::family::{CableFamily, MirrorPolicy};

/// Segments traversed from `start_id` to `end_id`, inclusive.
///
/// Empty when `start_id` is not part of the family. An empty or
/// unknown `end_id` degenerates to the single-segment path.
#[must_use]
pub fn path_between(
    family: &CableFamily,
    start_id: &str,
    end_id: &str,
) -> Vec<&'static str> {
    let ids: Vec<&'static str> = family.segments.iter().map(|s| s.id).collect();
    let Some(start_idx) = family.segment_index(start_id) else {
        return Vec::new();
    };
    if end_id.is_empty() || start_id == end_id {
        return vec![ids[start_idx]];
    }
    let Some(end_idx) = family.segment_index(end_id) else {
        return vec![ids[start_idx]];
    };

    let from = start_idx.min(end_idx);
    let to = start_idx.max(end_idx);
    let mut slice: Vec<&'static str> = ids[from..=to].to_vec();
    if start_idx > end_idx {
        slice.reverse();
    }
    slice
}

/// Mirror flag straight from the survey table for one span endpoint pair.
///
/// The table is keyed by the selection order (point A, point B); the
/// `a` flag applies when the queried segment is point A, `b` when it is
/// point B. Anything else, including uncharted pairs, is not mirrored.
fn table_flag(family: &CableFamily, segment_id: &str, a: &str, b: &str) -> bool {
    family.mirror_rule(a, b).is_some_and(|rule| {
        if segment_id == a {
            rule.a
        } else if segment_id == b {
            rule.b
        } else {
            false
        }
    })
}

/// Whether `segment_id`'s table must be read axis-flipped for the span
/// (`start_id`, `end_id`).
#[must_use]
pub fn is_mirrored(
    family: &CableFamily,
    segment_id: &str,
    start_id: &str,
    end_id: &str,
) -> bool {
    match family.mirror_policy {
        MirrorPolicy::EndpointsOnly => table_flag(family, segment_id, start_id, end_id),
        MirrorPolicy::SpanWide => {
            let a_idx = family.segment_index(start_id);
            let b_idx = family.segment_index(end_id);
            let seg_idx = family.segment_index(segment_id);
            if let (Some(a), Some(b), Some(seg)) = (a_idx, b_idx, seg_idx) {
                if (a.min(b)..=a.max(b)).contains(&seg) {
                    return table_flag(family, segment_id, start_id, end_id);
                }
            }
            if segment_id == start_id || segment_id == end_id {
                return table_flag(family, segment_id, start_id, end_id);
            }
            // Outside the span entirely: orient against point A alone.
            if seg_idx.is_some() {
                return table_flag(family, segment_id, start_id, segment_id);
            }
            false
        }
    }
}
