//! cablecut-export: Pure output serializers (sans-IO)
//!
//! Converts assembled cut events into the shapes external collaborators
//! consume: the `cable-cuts` REST payload and human-readable summaries.

pub mod payload;
pub mod report;

pub use payload::{CutSubmission, UNKNOWN, build_submission, cut_id};
pub use report::{SpanSummary, marker_summary, span_summary};
