//! cablecut-core: Route-distance interpolation and cut simulation for
//! submarine cable systems (sans-IO).
//!
//! Maps an operator's "distance from Point A" along a span of cable
//! segments to an estimated geographic fault point:
//! span resolution -> mirror orientation -> table interpolation ->
//! cut-event assembly.
//!
//! This crate has **no I/O dependencies** -- it operates on an
//! in-memory [`RouteSnapshot`] and returns structured data. Fetching
//! route feeds and persisting cut records live with the callers.

pub mod assemble;
pub mod family;
pub mod graph;
pub mod interpolate;
pub mod record;
pub mod resolve;
pub mod types;

pub use assemble::CutRequest;
pub use family::{CableFamily, FamilyId, MirrorPolicy, MirrorRule, SegmentSpec, SEA_US, TGN_IA};
pub use interpolate::RouteEstimate;
pub use resolve::ResolvedSpan;
pub use types::{
    Advisory, CoordPoint, CutEvent, CutField, CutOutcome, CutType, FieldError, RoutePoint,
    RouteSnapshot, SegmentBounds, SegmentStore, SimulationError,
};

use chrono::NaiveDateTime;

/// Simulate a cable cut against a loaded route snapshot.
///
/// Convenience wrapper over [`assemble::assemble`]; `now` feeds the
/// fault date/time defaulting and should be the caller's current local
/// time.
///
/// # Errors
///
/// See [`assemble::assemble`].
pub fn simulate(
    snapshot: &RouteSnapshot,
    family: &CableFamily,
    request: &CutRequest,
    now: NaiveDateTime,
) -> Result<CutOutcome, SimulationError> {
    assemble::assemble(snapshot, family, request, now)
}
