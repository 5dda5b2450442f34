//! cablecut: CLI for simulating submarine cable cuts against local
//! route-position tables.
//!
//! Loads per-segment route tables from JSON files (one array of raw
//! feed records per segment, named after the segment's feed path),
//! simulates a cut at a distance along the selected span, and prints
//! either the marker summary or the `cable-cuts` submission payload.
//!
//! # Usage
//!
//! ```text
//! cablecut <ROUTES_DIR> --cable sea-us --start S1 --end S2 \
//!     --distance 60 --cut-type "Fiber Break" [--json]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate, NaiveTime, Utc};
use clap::{Parser, ValueEnum};

use cablecut_core::{
    CableFamily, CutRequest, CutType, FamilyId, RouteSnapshot, SimulationError, record,
};
use cablecut_export::{build_submission, marker_summary, span_summary};

/// Simulate a submarine cable cut and print the resulting record.
#[derive(Parser)]
#[command(name = "cablecut", version)]
struct Cli {
    /// Directory holding one JSON file per segment, named after the
    /// segment's feed path (e.g. `sea-us-rpl-s1.json`).
    routes_dir: PathBuf,

    /// Cable system to simulate against.
    #[arg(long, value_enum)]
    cable: Cable,

    /// Point A segment id (e.g. S1).
    #[arg(long)]
    start: String,

    /// Point B segment id; defaults to point A.
    #[arg(long)]
    end: Option<String>,

    /// Target distance from point A in km.
    #[arg(long)]
    distance: f64,

    /// Fault classification (Shunt Fault, Partial Fiber Break,
    /// Fiber Break, Full Cut, Unclassified).
    #[arg(long)]
    cut_type: String,

    /// Fault date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    fault_date: Option<NaiveDate>,

    /// Fault time (HH:MM); defaults to the current time.
    #[arg(long, value_parser = parse_time)]
    fault_time: Option<NaiveTime>,

    /// Existing cut id to update instead of creating a new cut.
    #[arg(long)]
    cut_id: Option<String>,

    /// Print the submission payload as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

/// Cable system selection.
#[derive(Clone, Copy, ValueEnum)]
enum Cable {
    /// SEA-US (6 segments).
    SeaUs,
    /// TGN-IA (12 segments).
    Tgnia,
}

impl Cable {
    const fn family_id(self) -> FamilyId {
        match self {
            Self::SeaUs => FamilyId::SeaUs,
            Self::Tgnia => FamilyId::Tgnia,
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| format!("invalid time {s:?}: {e}"))
}

/// Load every segment table found under `dir`.
///
/// A missing or unreadable file leaves that segment out of the
/// snapshot; the simulation then reports missing route data only if
/// the requested span actually needs it.
fn load_snapshot(dir: &Path, family: &CableFamily) -> RouteSnapshot {
    let mut snapshot = RouteSnapshot::new();
    for segment in family.segments {
        let name = format!("{}.json", segment.feed_path.trim_start_matches('/'));
        let path = dir.join(name);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        let rows: Vec<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        snapshot.insert(
            segment.id,
            record::build_segment(&rows, family.distance_keys),
        );
    }
    snapshot
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let family = cli.cable.family_id().family();

    let cut_type: CutType = match cli.cut_type.parse() {
        Ok(ct) => ct,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = load_snapshot(&cli.routes_dir, family);
    eprintln!(
        "{}: loaded {} of {} segment tables",
        family.name,
        snapshot.len(),
        family.segments.len(),
    );

    let end = cli.end.clone().unwrap_or_else(|| cli.start.clone());
    let summary = span_summary(&snapshot, family, &cli.start, &end);
    eprintln!("{}", summary.captions());

    let request = CutRequest {
        start_segment: cli.start.clone(),
        end_segment: end.clone(),
        target_km: cli.distance,
        cut_type: Some(cut_type),
        fault_date: cli.fault_date,
        fault_time: cli.fault_time,
    };

    let now = Local::now().naive_local();
    let outcome = match cablecut_core::simulate(&snapshot, family, &request, now) {
        Ok(outcome) => outcome,
        Err(SimulationError::Validation(errors)) => {
            for err in errors {
                eprintln!("{}", err.message);
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        let simulated_at = Utc::now();
        let submission = build_submission(
            family,
            &outcome.event,
            &cli.start,
            &end,
            simulated_at,
            simulated_at.timestamp_millis(),
            cli.cut_id.as_deref(),
        );
        match serde_json::to_string_pretty(&submission.body) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing payload: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", marker_summary(&outcome.event));
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn time_parser_accepts_both_precisions() {
        assert_eq!(
            parse_time("07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap(),
        );
        assert_eq!(
            parse_time("07:05:30").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 30).unwrap(),
        );
        assert!(parse_time("7 o'clock").is_err());
    }

    #[test]
    fn cable_values_map_to_families() {
        assert_eq!(Cable::SeaUs.family_id().family().slug, "sea-us");
        assert_eq!(Cable::Tgnia.family_id().family().slug, "tgnia");
    }
}
