//! Static cable-family descriptors.
//!
//! Everything here is survey data or naming convention: the canonical
//! segment ordering, the per-family distance-column alternates, and the
//! hand-authored mirror tables. The mirror tables record, for each
//! ordered pair of selected endpoints, whether each endpoint's route
//! table runs opposite to the travel direction of the span. They encode
//! how the cables were physically laid and surveyed, so they must not
//! be "simplified" or derived; a missing entry means not mirrored.

use serde::{Deserialize, Serialize};

use crate::types::CutType;

/// One selectable segment of a cable system.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SegmentSpec {
    /// Canonical id, `S1` through `S12`.
    pub id: &'static str,
    /// Operator-facing label, shown in pickers and stored on cut records.
    pub label: &'static str,
    /// Route-feed path the segment's position table is served under.
    pub feed_path: &'static str,
}

/// Mirror flags for one (point A, point B) endpoint pair.
///
/// `a` applies when the segment being interpolated is point A of the
/// span, `b` when it is point B.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MirrorRule {
    pub a: bool,
    pub b: bool,
}

/// Which segments of a span the mirror table is consulted for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MirrorPolicy {
    /// Only the two selected endpoints are ever checked.
    EndpointsOnly,
    /// Every segment inside the span is checked; segments outside it
    /// fall back to the endpoint check, then to the (point A, segment)
    /// pair's `b` flag.
    SpanWide,
}

type MirrorRow = (&'static str, &'static [(&'static str, MirrorRule)]);

/// A cable system: fixed segment ordering plus family-specific policy.
#[derive(Clone, Copy, Debug)]
pub struct CableFamily {
    /// Display name, e.g. `SEA-US`.
    pub name: &'static str,
    /// Wire identifier stored in the `cable` field of cut records.
    pub slug: &'static str,
    /// Cut-id prefix before the segment number, e.g. `seaus`.
    pub cut_id_prefix: &'static str,
    /// Source-table prefix before the segment number, e.g. `sea_us_rpl_s`.
    pub table_prefix: &'static str,
    /// Segments in canonical order.
    pub segments: &'static [SegmentSpec],
    /// Distance-column alternates, highest priority first.
    pub distance_keys: &'static [&'static str],
    /// Survey mirror table, keyed point A id then point B id.
    pub mirror_table: &'static [MirrorRow],
    pub mirror_policy: MirrorPolicy,
    /// Fault classifications offered for this system.
    pub cut_types: &'static [CutType],
    /// Whether cut records carry the endpoint labels (`point_a`/`point_b`).
    pub labels_in_records: bool,
}

/// Identifies a family when one must travel through config or output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyId {
    SeaUs,
    Tgnia,
}

impl FamilyId {
    #[must_use]
    pub const fn family(self) -> &'static CableFamily {
        match self {
            Self::SeaUs => &SEA_US,
            Self::Tgnia => &TGN_IA,
        }
    }
}

impl CableFamily {
    /// Position of a segment in the canonical ordering.
    #[must_use]
    pub fn segment_index(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    #[must_use]
    pub fn segment(&self, id: &str) -> Option<&'static SegmentSpec> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Operator-facing label for a segment id, or the id itself if unknown.
    #[must_use]
    pub fn label<'a>(&self, id: &'a str) -> &'a str {
        self.segment(id).map_or(id, |s| s.label)
    }

    /// Mirror flags recorded for the ordered endpoint pair (a, b).
    ///
    /// Absent pairs (same segment twice, or a pairing the surveyors
    /// never charted) yield `None`, which callers treat as not
    /// mirrored.
    #[must_use]
    pub fn mirror_rule(&self, a: &str, b: &str) -> Option<MirrorRule> {
        let (_, row) = self.mirror_table.iter().find(|(id, _)| *id == a)?;
        row.iter()
            .find(|(id, _)| *id == b)
            .map(|&(_, rule)| rule)
    }

    /// Numeric part of a segment id, defaulting to 1 when absent.
    ///
    /// Feeds the cut-id and source-table naming, which survive even a
    /// malformed id rather than failing the whole simulation.
    #[must_use]
    pub fn segment_number(id: &str) -> u32 {
        let digits: String = id.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(1)
    }
}

const fn rule(a: bool, b: bool) -> MirrorRule {
    MirrorRule { a, b }
}

/// SEA-US: Southeast Asia - United States, six segments.
///
/// The mirror table covers S1 through S5 only; S6 and any uncharted
/// pairing stay unmirrored.
pub static SEA_US: CableFamily = CableFamily {
    name: "SEA-US",
    slug: "sea-us",
    cut_id_prefix: "seaus",
    table_prefix: "sea_us_rpl_s",
    segments: &[
        SegmentSpec {
            id: "S1",
            label: "S1 - Kauditan",
            feed_path: "/sea-us-rpl-s1",
        },
        SegmentSpec {
            id: "S2",
            label: "S2 - Davao",
            feed_path: "/sea-us-rpl-s2",
        },
        SegmentSpec {
            id: "S3",
            label: "S3 - Piti - BU Davao City",
            feed_path: "/sea-us-rpl-s3",
        },
        SegmentSpec {
            id: "S4",
            label: "S4 - Piti - Hawaii BU",
            feed_path: "/sea-us-rpl-s4",
        },
        SegmentSpec {
            id: "S5",
            label: "S5 - Makaha, Hawaii",
            feed_path: "/sea-us-rpl-s5",
        },
        SegmentSpec {
            id: "S6",
            label: "S6 - Hermosa, USA",
            feed_path: "/sea-us-rpl-s6",
        },
    ],
    distance_keys: &[
        "cable_cumulative_total",
        "cumulative_total",
        "cable_between_positions",
    ],
    mirror_table: &[
        (
            "S1",
            &[
                ("S2", rule(false, true)),
                ("S3", rule(false, true)),
                ("S4", rule(false, false)),
                ("S5", rule(false, true)),
            ],
        ),
        (
            "S2",
            &[
                ("S1", rule(false, true)),
                ("S3", rule(false, true)),
                ("S4", rule(false, false)),
                ("S5", rule(false, true)),
            ],
        ),
        (
            "S3",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S4", rule(true, false)),
                ("S5", rule(true, true)),
            ],
        ),
        (
            "S4",
            &[
                ("S1", rule(true, true)),
                ("S2", rule(true, true)),
                ("S3", rule(true, false)),
                ("S5", rule(false, true)),
            ],
        ),
        (
            "S5",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S3", rule(false, false)),
                ("S4", rule(false, true)),
            ],
        ),
    ],
    mirror_policy: MirrorPolicy::EndpointsOnly,
    cut_types: &[
        CutType::ShuntFault,
        CutType::PartialFiberBreak,
        CutType::FiberBreak,
        CutType::FullCut,
    ],
    labels_in_records: false,
};

/// TGN-IA: Tata Global Network - Intra Asia, twelve segments.
///
/// Trunk segments S1-S6 run between branching units; S7-S12 are the
/// branch legs and stubs. The mirror table charts every ordered pair.
pub static TGN_IA: CableFamily = CableFamily {
    name: "TGN-IA",
    slug: "tgnia",
    cut_id_prefix: "tgnia",
    table_prefix: "tgnia_rpl_s",
    segments: &[
        SegmentSpec {
            id: "S1",
            label: "S1 | Tenah Merah - BU1",
            feed_path: "/tgnia-rpl-s1",
        },
        SegmentSpec {
            id: "S2",
            label: "S2 | BU1 - BU2",
            feed_path: "/tgnia-rpl-s2",
        },
        SegmentSpec {
            id: "S3",
            label: "S3 | BU2 - BU3",
            feed_path: "/tgnia-rpl-s3",
        },
        SegmentSpec {
            id: "S4",
            label: "S4 | BU3 - BU4",
            feed_path: "/tgnia-rpl-s4",
        },
        SegmentSpec {
            id: "S5",
            label: "S5 | BU4 - BU5",
            feed_path: "/tgnia-rpl-s5",
        },
        SegmentSpec {
            id: "S6",
            label: "S6 | BU5 - BU6",
            feed_path: "/tgnia-rpl-s6",
        },
        SegmentSpec {
            id: "S7",
            label: "S7 | Malaysia Stub (Clump Weight - BU1)",
            feed_path: "/tgnia-rpl-s7",
        },
        SegmentSpec {
            id: "S8",
            label: "S8 | Vung Tau - BU2",
            feed_path: "/tgnia-rpl-s8",
        },
        SegmentSpec {
            id: "S9",
            label: "S9 | Deep Water Bay - BU3",
            feed_path: "/tgnia-rpl-s9",
        },
        SegmentSpec {
            id: "S10",
            label: "S10 | Ballesteros - BU4",
            feed_path: "/tgnia-rpl-s10",
        },
        SegmentSpec {
            id: "S11",
            label: "S11 | China Stub (Clump Weight - BU5)",
            feed_path: "/tgnia-rpl-s11",
        },
        SegmentSpec {
            id: "S12",
            label: "S12 | TGN G2 Stub (BU7 - Clump Weight)",
            feed_path: "/tgnia-rpl-s12",
        },
    ],
    distance_keys: &[
        "cable_cumulative_total",
        "cumulative_total",
        "cable_between_positions",
        "route_distance_cumm",
    ],
    mirror_table: &[
        (
            "S1",
            &[
                ("S2", rule(false, false)),
                ("S3", rule(false, false)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(false, true)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S2",
            &[
                ("S1", rule(true, true)),
                ("S3", rule(false, false)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(true, true)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S3",
            &[
                ("S1", rule(true, true)),
                ("S2", rule(true, true)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(true, true)),
                ("S8", rule(true, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S4",
            &[
                ("S1", rule(true, true)),
                ("S2", rule(true, true)),
                ("S3", rule(true, true)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(true, true)),
                ("S8", rule(true, true)),
                ("S9", rule(true, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S5",
            &[
                ("S1", rule(true, true)),
                ("S2", rule(true, true)),
                ("S3", rule(true, true)),
                ("S4", rule(true, true)),
                ("S6", rule(false, true)),
                ("S7", rule(true, true)),
                ("S8", rule(true, true)),
                ("S9", rule(true, true)),
                ("S10", rule(true, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S6",
            &[
                ("S1", rule(true, true)),
                ("S2", rule(true, true)),
                ("S3", rule(true, true)),
                ("S4", rule(true, true)),
                ("S5", rule(true, true)),
                ("S7", rule(true, true)),
                ("S8", rule(true, true)),
                ("S9", rule(true, true)),
                ("S10", rule(true, true)),
                ("S11", rule(true, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S7",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, false)),
                ("S3", rule(false, false)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S8",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S3", rule(false, false)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S9",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, false)),
                ("S3", rule(false, false)),
                ("S4", rule(false, false)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(false, true)),
                ("S8", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S10",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S3", rule(false, true)),
                ("S4", rule(false, true)),
                ("S5", rule(false, false)),
                ("S6", rule(false, false)),
                ("S7", rule(false, true)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S11", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S11",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S3", rule(false, true)),
                ("S4", rule(false, true)),
                ("S5", rule(false, true)),
                ("S6", rule(false, true)),
                ("S7", rule(false, true)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S12", rule(false, true)),
            ],
        ),
        (
            "S12",
            &[
                ("S1", rule(false, true)),
                ("S2", rule(false, true)),
                ("S3", rule(false, true)),
                ("S4", rule(false, true)),
                ("S5", rule(false, true)),
                ("S6", rule(false, true)),
                ("S7", rule(false, true)),
                ("S8", rule(false, true)),
                ("S9", rule(false, true)),
                ("S10", rule(false, true)),
                ("S11", rule(false, true)),
            ],
        ),
    ],
    mirror_policy: MirrorPolicy::SpanWide,
    cut_types: &[
        CutType::ShuntFault,
        CutType::PartialFiberBreak,
        CutType::FiberBreak,
        CutType::FullCut,
        CutType::Unclassified,
    ],
    labels_in_records: true,
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sea_us_has_six_segments_in_order() {
        let ids: Vec<&str> = SEA_US.segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["S1", "S2", "S3", "S4", "S5", "S6"]);
        assert_eq!(SEA_US.segment_index("S4"), Some(3));
        assert_eq!(SEA_US.segment_index("S7"), None);
    }

    #[test]
    fn tgnia_has_twelve_segments_with_full_mirror_rows() {
        assert_eq!(TGN_IA.segments.len(), 12);
        assert_eq!(TGN_IA.mirror_table.len(), 12);
        for (id, row) in TGN_IA.mirror_table {
            // every row charts all eleven other segments
            assert_eq!(row.len(), 11, "row {id}");
            assert!(!row.iter().any(|(other, _)| other == id));
        }
    }

    #[test]
    fn sea_us_table_omits_s6() {
        assert_eq!(SEA_US.mirror_table.len(), 5);
        assert_eq!(SEA_US.mirror_rule("S6", "S1"), None);
        assert_eq!(SEA_US.mirror_rule("S1", "S6"), None);
    }

    #[test]
    fn mirror_rule_spot_checks() {
        assert_eq!(SEA_US.mirror_rule("S3", "S4"), Some(rule(true, false)));
        assert_eq!(SEA_US.mirror_rule("S4", "S1"), Some(rule(true, true)));
        assert_eq!(SEA_US.mirror_rule("S5", "S3"), Some(rule(false, false)));
        assert_eq!(TGN_IA.mirror_rule("S1", "S7"), Some(rule(false, true)));
        assert_eq!(TGN_IA.mirror_rule("S6", "S12"), Some(rule(false, true)));
        assert_eq!(TGN_IA.mirror_rule("S10", "S5"), Some(rule(false, false)));
        assert_eq!(TGN_IA.mirror_rule("S2", "S1"), Some(rule(true, true)));
    }

    #[test]
    fn mirror_rule_is_ordered_not_symmetric() {
        let forward = TGN_IA.mirror_rule("S1", "S2").unwrap();
        let reverse = TGN_IA.mirror_rule("S2", "S1").unwrap();
        assert_ne!(forward, reverse);
    }

    #[test]
    fn same_segment_pair_is_uncharted() {
        assert_eq!(SEA_US.mirror_rule("S2", "S2"), None);
        assert_eq!(TGN_IA.mirror_rule("S5", "S5"), None);
    }

    #[test]
    fn segment_number_extracts_digits() {
        assert_eq!(CableFamily::segment_number("S10"), 10);
        assert_eq!(CableFamily::segment_number("S1"), 1);
        assert_eq!(CableFamily::segment_number("bogus"), 1);
    }

    #[test]
    fn only_tgnia_offers_the_unclassified_type() {
        assert!(!SEA_US.cut_types.contains(&CutType::Unclassified));
        assert!(TGN_IA.cut_types.contains(&CutType::Unclassified));
        assert!(SEA_US.cut_types.contains(&CutType::FullCut));
    }

    #[test]
    fn labels_resolve_with_fallback() {
        assert_eq!(TGN_IA.label("S8"), "S8 | Vung Tau - BU2");
        assert_eq!(TGN_IA.label("S99"), "S99");
    }

    #[test]
    fn family_id_round_trips_through_serde() {
        let json = serde_json::to_string(&FamilyId::SeaUs).unwrap();
        assert_eq!(json, "\"sea-us\"");
        let back: FamilyId = serde_json::from_str("\"tgnia\"").unwrap();
        assert_eq!(back, FamilyId::Tgnia);
    }
}
