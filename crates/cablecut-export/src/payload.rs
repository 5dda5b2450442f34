//! `cable-cuts` REST payload serializer.
//!
//! Builds the JSON body the persistence collaborator expects for a
//! simulated cut, including the legacy quirks of that contract: the
//! cable type appears under both `cable_type` and `cableType`, depth
//! falls back to the string `"Unknown"`, and TGN-IA records carry the
//! endpoint labels. Pure function, no I/O; submitting the body is the
//! caller's job.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use cablecut_core::{CableFamily, CutEvent};

/// Sentinel for metadata the interpolation could not derive.
pub const UNKNOWN: &str = "Unknown";

/// A payload ready for submission, with the identifier split out so
/// the caller can build the resource URL.
#[derive(Clone, Debug, PartialEq)]
pub struct CutSubmission {
    /// Unique cut identifier, `{prefix}{segment number}-{millis}`.
    pub cut_id: String,
    /// True when an edited cut moved to a different segment and had to
    /// be re-identified; the body then carries `new_cut_id`.
    pub renamed: bool,
    /// The JSON body.
    pub body: Value,
}

/// Identifier for a new cut on the given segment.
#[must_use]
pub fn cut_id(family: &CableFamily, segment_number: u32, unix_millis: i64) -> String {
    format!("{}{segment_number}-{unix_millis}", family.cut_id_prefix)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn depth_value(event: &CutEvent) -> Value {
    event.depth.map_or_else(|| json!(UNKNOWN), |d| json!(d))
}

fn cable_type_value(event: &CutEvent) -> Value {
    event
        .cable_type
        .as_deref()
        .map_or_else(|| json!(UNKNOWN), |c| json!(c))
}

/// Build the submission for a cut event.
///
/// `start_id`/`end_id` are the span endpoints the operator selected;
/// TGN-IA records store their labels. `existing_cut_id` switches to the
/// update flow: the identifier is kept unless the owning segment
/// changed, in which case a fresh identifier is minted and sent as
/// `new_cut_id` alongside.
#[must_use]
pub fn build_submission(
    family: &CableFamily,
    event: &CutEvent,
    start_id: &str,
    end_id: &str,
    simulated_at: DateTime<Utc>,
    unix_millis: i64,
    existing_cut_id: Option<&str>,
) -> CutSubmission {
    let seg_num = CableFamily::segment_number(&event.segment_source);
    let desired_prefix = format!("{}{seg_num}", family.cut_id_prefix);
    let fresh_id = cut_id(family, seg_num, unix_millis);

    let (final_id, renamed) = match existing_cut_id {
        Some(existing) if existing.starts_with(&desired_prefix) => (existing.to_owned(), false),
        Some(_) => (fresh_id, true),
        None => (fresh_id, false),
    };

    let mut body = Map::new();
    body.insert("cut_id".to_owned(), json!(final_id));
    body.insert("distance".to_owned(), json!(round3(event.distance_km)));
    body.insert("cut_type".to_owned(), json!(event.cut_type.label()));
    body.insert(
        "fault_date".to_owned(),
        json!(event.fault_date_time.format("%Y-%m-%dT%H:%M").to_string()),
    );
    body.insert(
        "simulated".to_owned(),
        json!(simulated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    body.insert("latitude".to_owned(), json!(event.lat));
    body.insert("longitude".to_owned(), json!(event.lng));
    body.insert("depth".to_owned(), depth_value(event));
    body.insert("cable_type".to_owned(), cable_type_value(event));
    body.insert("cableType".to_owned(), cable_type_value(event));
    if family.labels_in_records {
        body.insert("point_a".to_owned(), json!(family.label(start_id)));
        body.insert("point_b".to_owned(), json!(family.label(end_id)));
    }
    body.insert("cable".to_owned(), json!(family.slug));
    body.insert("segment".to_owned(), json!(format!("s{seg_num}")));
    body.insert(
        "source_table".to_owned(),
        json!(format!("{}{seg_num}", family.table_prefix)),
    );
    if renamed {
        body.insert("new_cut_id".to_owned(), json!(final_id));
    }

    CutSubmission {
        cut_id: final_id,
        renamed,
        body: Value::Object(body),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cablecut_core::{CutType, SEA_US, TGN_IA};
    use chrono::{NaiveDate, TimeZone};

    fn event(segment: &str) -> CutEvent {
        CutEvent {
            distance_km: 60.123_456,
            segment_source: segment.to_owned(),
            lat: 6.012_345_678,
            lng: 120.654_321,
            depth: Some(1234.56),
            cable_type: Some("DA".to_owned()),
            cut_type: CutType::FiberBreak,
            fault_date_time: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        }
    }

    fn simulated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 4, 30, 0).unwrap()
    }

    #[test]
    fn sea_us_payload_shape() {
        let sub = build_submission(
            &SEA_US,
            &event("S2"),
            "S1",
            "S2",
            simulated(),
            1_700_000_000_000,
            None,
        );
        assert_eq!(sub.cut_id, "seaus2-1700000000000");
        assert!(!sub.renamed);
        let body = sub.body.as_object().unwrap();
        assert_eq!(body["cut_id"], "seaus2-1700000000000");
        assert_eq!(body["distance"], 60.123);
        assert_eq!(body["cut_type"], "Fiber Break");
        assert_eq!(body["fault_date"], "2025-03-14T12:30");
        assert_eq!(body["simulated"], "2025-03-14T04:30:00.000Z");
        assert_eq!(body["cable"], "sea-us");
        assert_eq!(body["segment"], "s2");
        assert_eq!(body["source_table"], "sea_us_rpl_s2");
        // the contract sends the type under both spellings
        assert_eq!(body["cable_type"], "DA");
        assert_eq!(body["cableType"], "DA");
        assert!(!body.contains_key("point_a"));
        assert!(!body.contains_key("new_cut_id"));
    }

    #[test]
    fn missing_metadata_renders_the_unknown_sentinel() {
        let mut ev = event("S1");
        ev.depth = None;
        ev.cable_type = None;
        let sub = build_submission(&SEA_US, &ev, "S1", "S1", simulated(), 1, None);
        let body = sub.body.as_object().unwrap();
        assert_eq!(body["depth"], "Unknown");
        assert_eq!(body["cable_type"], "Unknown");
        assert_eq!(body["cableType"], "Unknown");
    }

    #[test]
    fn tgnia_payload_carries_endpoint_labels() {
        let sub = build_submission(
            &TGN_IA,
            &event("S8"),
            "S2",
            "S8",
            simulated(),
            1_700_000_000_000,
            None,
        );
        let body = sub.body.as_object().unwrap();
        assert_eq!(body["point_a"], "S2 | BU1 - BU2");
        assert_eq!(body["point_b"], "S8 | Vung Tau - BU2");
        assert_eq!(body["cable"], "tgnia");
        assert_eq!(body["source_table"], "tgnia_rpl_s8");
    }

    #[test]
    fn editing_keeps_the_id_when_the_segment_matches() {
        let sub = build_submission(
            &TGN_IA,
            &event("S8"),
            "S2",
            "S8",
            simulated(),
            999,
            Some("tgnia8-1600000000000"),
        );
        assert_eq!(sub.cut_id, "tgnia8-1600000000000");
        assert!(!sub.renamed);
        assert!(!sub.body.as_object().unwrap().contains_key("new_cut_id"));
    }

    #[test]
    fn editing_keeps_an_id_whose_segment_number_shares_a_prefix() {
        // legacy contract quirk: the prefix check is textual, so a cut
        // resolving to S1 keeps an S12 id ("tgnia1" prefixes "tgnia12")
        let sub = build_submission(
            &TGN_IA,
            &event("S1"),
            "S1",
            "S1",
            simulated(),
            1_700_000_000_000,
            Some("tgnia12-1600000000000"),
        );
        assert_eq!(sub.cut_id, "tgnia12-1600000000000");
        assert!(!sub.renamed);
        assert!(!sub.body.as_object().unwrap().contains_key("new_cut_id"));
    }

    #[test]
    fn editing_renames_when_the_cut_moved_segments() {
        let sub = build_submission(
            &TGN_IA,
            &event("S8"),
            "S2",
            "S8",
            simulated(),
            1_700_000_000_000,
            Some("tgnia3-1600000000000"),
        );
        assert_eq!(sub.cut_id, "tgnia8-1700000000000");
        assert!(sub.renamed);
        let body = sub.body.as_object().unwrap();
        assert_eq!(body["new_cut_id"], "tgnia8-1700000000000");
    }

    #[test]
    fn distance_is_rounded_to_three_decimals() {
        assert!((round3(12.345_678) - 12.346).abs() < 1e-12);
        assert!((round3(0.0004) - 0.0).abs() < 1e-12);
    }
}
