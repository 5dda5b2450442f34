//! Cut-event assembly: validate a request, resolve and interpolate the
//! fault point, and package the result for persistence.
//!
//! Everything here returns values. Validation failures come back as a
//! list of field errors, clamped distances come back with an advisory
//! attached, and the caller decides what to do with either. The
//! assembler performs no I/O; submitting the event and drawing the
//! marker belong to collaborators.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::family::CableFamily;
use crate::graph;
use crate::interpolate::interpolate;
use crate::resolve::{clamp_target, resolve_on_path, total_span};
use crate::types::{
    Advisory, CutEvent, CutField, CutOutcome, CutType, FieldError, RouteSnapshot, SimulationError,
};

/// Operator input for one cut simulation.
///
/// `end_segment` may equal `start_segment` for a cut within a single
/// segment. A missing fault date or time defaults to the current date
/// or time independently.
#[derive(Clone, Debug, PartialEq)]
pub struct CutRequest {
    pub start_segment: String,
    pub end_segment: String,
    pub target_km: f64,
    pub cut_type: Option<CutType>,
    pub fault_date: Option<NaiveDate>,
    pub fault_time: Option<NaiveTime>,
}

fn field_error(field: CutField, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_owned(),
    }
}

fn validate(family: &CableFamily, request: &CutRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.start_segment.is_empty() {
        errors.push(field_error(
            CutField::StartSegment,
            "Please select Point A segment.",
        ));
    }
    if request.end_segment.is_empty() {
        errors.push(field_error(
            CutField::EndSegment,
            "Please select Point B segment.",
        ));
    }
    match request.cut_type {
        None => errors.push(field_error(CutField::CutType, "Please select a cut type.")),
        Some(ct) if !family.cut_types.contains(&ct) => {
            errors.push(FieldError {
                field: CutField::CutType,
                message: format!("{} is not a {} cut type.", ct.label(), family.name),
            });
        }
        Some(_) => {}
    }
    if !request.target_km.is_finite() {
        errors.push(field_error(
            CutField::DistanceKm,
            "Target distance must be a number.",
        ));
    }
    errors
}

/// Combine the optional date and time parts, defaulting each missing
/// part to `now` independently. The default time is truncated to the
/// minute, matching what an operator would have typed.
fn fault_date_time(request: &CutRequest, now: NaiveDateTime) -> NaiveDateTime {
    let date = request.fault_date.unwrap_or_else(|| now.date());
    let time = request.fault_time.unwrap_or_else(|| {
        now.time()
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or_else(|| now.time())
    });
    NaiveDateTime::new(date, time)
}

/// Preview a [`CutEvent`] for a request, clamping an out-of-range
/// distance instead of rejecting it.
///
/// Interactive inputs pass through out-of-range values while being
/// typed, so the preview pulls the target to the nearest span boundary
/// and reports the range violation as a non-fatal advisory. A preview
/// with advisories must not be submitted; [`assemble`] enforces that.
///
/// `now` is injected so the defaulting of fault date/time stays
/// deterministic under test.
///
/// # Errors
///
/// [`SimulationError::Validation`] for bad field input,
/// [`SimulationError::NoRouteData`] when the selected span has no
/// loaded route data, and [`SimulationError::UnresolvableLocation`]
/// when the owning segment has no coordinates to interpolate against.
pub fn preview(
    snapshot: &RouteSnapshot,
    family: &CableFamily,
    request: &CutRequest,
    now: NaiveDateTime,
) -> Result<CutOutcome, SimulationError> {
    let errors = validate(family, request);
    if !errors.is_empty() {
        return Err(SimulationError::Validation(errors));
    }
    let Some(cut_type) = request.cut_type else {
        return Err(SimulationError::Validation(vec![field_error(
            CutField::CutType,
            "Please select a cut type.",
        )]));
    };

    let path = graph::path_between(family, &request.start_segment, &request.end_segment);
    if path.is_empty() {
        return Err(SimulationError::NoRouteData);
    }
    let total = total_span(snapshot, &path);
    if total <= 0.0 {
        return Err(SimulationError::NoRouteData);
    }

    let bounded = clamp_target(request.target_km, total);
    let mut advisories = Vec::new();
    if request.target_km < 0.0 || request.target_km > total {
        advisories.push(Advisory {
            field: CutField::DistanceKm,
            message: format!("Target must be within 0 and {total:.3} km."),
        });
    }

    let resolved =
        resolve_on_path(snapshot, &path, bounded).ok_or(SimulationError::UnresolvableLocation)?;
    let store = snapshot
        .segment(resolved.segment_id)
        .ok_or(SimulationError::UnresolvableLocation)?;
    let mirrored = graph::is_mirrored(
        family,
        resolved.segment_id,
        &request.start_segment,
        &request.end_segment,
    );
    let estimate = interpolate(store, resolved.local_km, mirrored)
        .ok_or(SimulationError::UnresolvableLocation)?;

    Ok(CutOutcome {
        event: CutEvent {
            distance_km: bounded,
            segment_source: resolved.segment_id.to_owned(),
            lat: estimate.lat,
            lng: estimate.lng,
            depth: estimate.depth,
            cable_type: estimate.cable_type,
            cut_type,
            fault_date_time: fault_date_time(request, now),
        },
        advisories,
    })
}

/// Assemble a [`CutEvent`] ready for submission.
///
/// Identical to [`preview`] except that the range violation the
/// preview merely flags blocks assembly outright: an out-of-range
/// distance comes back as a [`CutField::DistanceKm`] field error and
/// no event is committed.
///
/// # Errors
///
/// As [`preview`], plus [`SimulationError::Validation`] when the
/// target distance lies outside the span.
pub fn assemble(
    snapshot: &RouteSnapshot,
    family: &CableFamily,
    request: &CutRequest,
    now: NaiveDateTime,
) -> Result<CutOutcome, SimulationError> {
    let outcome = preview(snapshot, family, request, now)?;
    if !outcome.advisories.is_empty() {
        let errors = outcome
            .advisories
            .into_iter()
            .map(|advisory| FieldError {
                field: advisory.field,
                message: advisory.message,
            })
            .collect();
        return Err(SimulationError::Validation(errors));
    }
    Ok(outcome)
}
