//! Human-readable summaries: the marker popup block and the distance
//! helper captions.

use std::fmt::Write;

use cablecut_core::graph::path_between;
use cablecut_core::resolve::total_span;
use cablecut_core::{CableFamily, CutEvent, RouteSnapshot};

/// Lengths a front-end needs to caption the distance input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanSummary {
    /// Length of the point A segment, km.
    pub len_a: f64,
    /// Length of the point B segment, km. Zero when A and B coincide.
    pub len_b: f64,
    /// Combined length of every segment on the span.
    pub total: f64,
}

/// Per-endpoint and total lengths for a selected span.
#[must_use]
pub fn span_summary(
    snapshot: &RouteSnapshot,
    family: &CableFamily,
    start_id: &str,
    end_id: &str,
) -> SpanSummary {
    let len_a = snapshot.segment_length(start_id);
    let len_b = if start_id == end_id {
        0.0
    } else {
        snapshot.segment_length(end_id)
    };
    let path = path_between(family, start_id, end_id);
    SpanSummary {
        len_a,
        len_b,
        total: total_span(snapshot, &path),
    }
}

fn length_caption(len: f64) -> String {
    if len > 0.0 {
        format!("{len:.3} km")
    } else {
        "--".to_owned()
    }
}

impl SpanSummary {
    /// The captions shown beside the distance input.
    #[must_use]
    pub fn captions(&self) -> String {
        format!(
            "Point A length: {}\nPoint B length: {}\nRange: 0 - {:.3} km",
            length_caption(self.len_a),
            length_caption(self.len_b),
            self.total,
        )
    }
}

/// The text block a map marker popup shows for a cut.
///
/// Depth prints with one decimal, coordinates with six; metadata the
/// interpolation could not derive prints as `Unknown`.
#[must_use]
pub fn marker_summary(event: &CutEvent) -> String {
    let depth = event
        .depth
        .map_or_else(|| "Unknown".to_owned(), |d| format!("{d:.1}"));
    let cable_type = event.cable_type.as_deref().unwrap_or("Unknown");

    let mut out = String::new();
    let _ = writeln!(out, "{}", event.cut_type.label().to_uppercase());
    let _ = writeln!(out, "Distance: {:.3} km", event.distance_km);
    let _ = writeln!(out, "Depth: {depth} m");
    let _ = writeln!(out, "Lat: {:.6}", event.lat);
    let _ = writeln!(out, "Lng: {:.6}", event.lng);
    let _ = writeln!(out, "Date: {}", event.fault_date_time.format("%b %-d, %Y"));
    let _ = writeln!(out, "Time: {}", event.fault_date_time.format("%H:%M"));
    let _ = write!(out, "Cable Type: {cable_type}");
    out
}
