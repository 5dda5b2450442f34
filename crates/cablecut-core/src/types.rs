//! Shared types for the cablecut simulation engine.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of a segment's route-position list (RPL).
///
/// `km` is the cumulative distance-along-cable value as recorded in the
/// source table — not geodesic distance. It is always present and finite;
/// rows without a usable distance are dropped during
/// [`build`](crate::record::build_segment).
///
/// `lat`/`lng` may be absent for metadata-only rows (e.g. a cable-type
/// transition recorded between surveyed positions). `depth` and
/// `cable_type` are optional everywhere; `None` means "unknown", not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Cumulative distance along the cable in kilometres.
    pub km: f64,
    /// Latitude in decimal degrees, when the row carries a position.
    pub lat: Option<f64>,
    /// Longitude in decimal degrees, when the row carries a position.
    pub lng: Option<f64>,
    /// Approximate depth in metres, when recorded.
    pub depth: Option<f64>,
    /// Cable armouring/type label, when recorded.
    pub cable_type: Option<String>,
}

/// A route-position row that carries a known coordinate.
///
/// The `coords` subset of a [`SegmentStore`] uses this type so that
/// interpolation never has to re-check coordinate presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordPoint {
    /// Cumulative distance along the cable in kilometres.
    pub km: f64,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Approximate depth in metres, when recorded.
    pub depth: Option<f64>,
}

/// Minimum, maximum, and extent of a segment's native distance axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentBounds {
    /// Smallest recorded `km` value.
    pub min: f64,
    /// Largest recorded `km` value.
    pub max: f64,
    /// `max - min`, never negative. Zero for an empty segment.
    pub length: f64,
}

/// Parsed route-position table for one cable segment.
///
/// `meta` holds every retained row sorted ascending by `km`; `coords` is
/// the sub-sequence of rows with a known position, also sorted. Both are
/// immutable after [`build`](crate::record::build_segment) — a feed
/// refresh replaces the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentStore {
    /// All rows with a usable distance, including coordinate-less ones.
    pub meta: Vec<RoutePoint>,
    /// Rows with a known coordinate, used for lat/lng interpolation.
    pub coords: Vec<CoordPoint>,
}

impl SegmentStore {
    /// Distance-axis bounds over the `meta` rows.
    ///
    /// Returns all-zero bounds for an empty segment.
    #[must_use]
    pub fn bounds(&self) -> SegmentBounds {
        let mut kms = self.meta.iter().map(|p| p.km).filter(|v| v.is_finite());
        let Some(first) = kms.next() else {
            return SegmentBounds {
                min: 0.0,
                max: 0.0,
                length: 0.0,
            };
        };
        let (min, max) = kms.fold((first, first), |(lo, hi), km| (lo.min(km), hi.max(km)));
        SegmentBounds {
            min,
            max,
            length: (max - min).max(0.0),
        }
    }

    /// Segment length in kilometres (`max km - min km` over `meta`).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.bounds().length
    }
}

/// Immutable set of segment stores for one cable family, keyed by
/// segment id (`"S1"`, `"S2"`, ...).
///
/// Built wholesale from a route-feed refresh; resolutions against one
/// snapshot never observe partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    segments: BTreeMap<String, SegmentStore>,
}

impl RouteSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
        }
    }

    /// Add or replace the store for a segment.
    pub fn insert(&mut self, segment_id: impl Into<String>, store: SegmentStore) {
        self.segments.insert(segment_id.into(), store);
    }

    /// The store for a segment, if loaded.
    #[must_use]
    pub fn segment(&self, segment_id: &str) -> Option<&SegmentStore> {
        self.segments.get(segment_id)
    }

    /// Length of a segment in kilometres, 0 when missing or empty.
    #[must_use]
    pub fn segment_length(&self, segment_id: &str) -> f64 {
        self.segment(segment_id).map_or(0.0, SegmentStore::length)
    }

    /// Number of loaded segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segments are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromIterator<(String, SegmentStore)> for RouteSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, SegmentStore)>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Kind of simulated fault, as presented to operators.
///
/// `Unclassified` is only offered for TGN-IA; validation checks the
/// requested type against the family's
/// [`cut_types`](crate::family::CableFamily::cut_types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutType {
    /// Insulation fault shorting the power conductor to sea water.
    #[serde(rename = "Shunt Fault")]
    ShuntFault,
    /// Some fibre pairs broken, others still carrying traffic.
    #[serde(rename = "Partial Fiber Break")]
    PartialFiberBreak,
    /// All fibre pairs broken, armour intact.
    #[serde(rename = "Fiber Break")]
    FiberBreak,
    /// Complete severance of the cable.
    #[serde(rename = "Full Cut")]
    FullCut,
    /// Fault of undetermined nature.
    #[serde(rename = "Unclassified")]
    Unclassified,
}

impl CutType {
    /// The operator-facing label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShuntFault => "Shunt Fault",
            Self::PartialFiberBreak => "Partial Fiber Break",
            Self::FiberBreak => "Fiber Break",
            Self::FullCut => "Full Cut",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for CutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shunt Fault" => Ok(Self::ShuntFault),
            "Partial Fiber Break" => Ok(Self::PartialFiberBreak),
            "Fiber Break" => Ok(Self::FiberBreak),
            "Full Cut" => Ok(Self::FullCut),
            "Unclassified" => Ok(Self::Unclassified),
            other => Err(format!("unknown cut type: {other}")),
        }
    }
}

/// Which request field a validation message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutField {
    /// The Point A (start) segment selection.
    StartSegment,
    /// The Point B (end) segment selection.
    EndSegment,
    /// The target distance along the selected span.
    DistanceKm,
    /// The fault classification.
    CutType,
}

impl fmt::Display for CutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartSegment => "start segment",
            Self::EndSegment => "end segment",
            Self::DistanceKm => "distance",
            Self::CutType => "cut type",
        };
        f.write_str(name)
    }
}

/// A field-level validation failure.
///
/// These surface as inline form text, never as exceptions; a request
/// with any field errors is not partially committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field.
    pub field: CutField,
    /// Operator-facing message.
    pub message: String,
}

/// A non-fatal advisory attached to an otherwise successful simulation.
///
/// The one producer today is an out-of-range target distance, which is
/// clamped rather than rejected (interactive inputs routinely pass
/// through out-of-range values while being typed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// The field the advisory relates to.
    pub field: CutField,
    /// Operator-facing message.
    pub message: String,
}

/// A simulated fault point, ready for the persistence and rendering
/// collaborators.
///
/// `depth` and `cable_type` stay `None` when no nearby metadata exists;
/// the export layer renders those as the `"Unknown"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutEvent {
    /// Distance from the start of the selected span, after clamping.
    pub distance_km: f64,
    /// The segment that owns the cut position.
    pub segment_source: String,
    /// Interpolated latitude in decimal degrees.
    pub lat: f64,
    /// Interpolated longitude in decimal degrees.
    pub lng: f64,
    /// Interpolated depth in metres, when derivable.
    pub depth: Option<f64>,
    /// Nearest cable-type label, when derivable.
    pub cable_type: Option<String>,
    /// The requested fault classification.
    pub cut_type: CutType,
    /// Fault date and time; missing parts default to "now" independently.
    pub fault_date_time: NaiveDateTime,
}

/// Successful simulation output: the event plus any advisories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutOutcome {
    /// The assembled fault record.
    pub event: CutEvent,
    /// Non-fatal notes (e.g. the distance was clamped into range).
    pub advisories: Vec<Advisory>,
}

/// Errors produced while assembling a cut event.
///
/// All failures are returned as values; the engine never panics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// One or more request fields failed validation.
    #[error("invalid cut request: {}", join_messages(.0))]
    Validation(Vec<FieldError>),

    /// The selected segments have no loaded route data (or the start
    /// segment is not part of the family's ordering).
    #[error("no route data available for the selected segments")]
    NoRouteData,

    /// The owning segment has no coordinate rows, so no point can be
    /// placed on the map.
    #[error("unable to calculate cut location")]
    UnresolvableLocation,
}

fn join_messages(errors: &[FieldError]) -> String {
    let mut out = String::new();
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&err.message);
    }
    out
}
