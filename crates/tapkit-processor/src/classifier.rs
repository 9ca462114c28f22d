//! Distance tier classification
//!
//! Every segment gets exactly one dwell, chosen by a fixed evaluation order:
//! short when `d < short.max_distance`, else medium when
//! `d < medium.max_distance`, else long. The long tier's `min_distance` is
//! never consulted, so inverted thresholds still classify every distance.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tapkit_core::PauseTiers;

use crate::geometry::Segment;

/// Distance band of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseTier {
    Short,
    Medium,
    Long,
}

impl PauseTier {
    /// Classify a single distance
    pub fn for_distance(distance: f64, tiers: &PauseTiers) -> Self {
        if distance < tiers.short.max_distance {
            PauseTier::Short
        } else if distance < tiers.medium.max_distance {
            PauseTier::Medium
        } else {
            PauseTier::Long
        }
    }

    /// Configured dwell duration of this tier
    pub fn seconds(self, tiers: &PauseTiers) -> f64 {
        match self {
            PauseTier::Short => tiers.short.seconds,
            PauseTier::Medium => tiers.medium.seconds,
            PauseTier::Long => tiers.long.seconds,
        }
    }

    /// Whether a segment in this tier clears the accumulator
    pub fn resets_accumulator(self) -> bool {
        !matches!(self, PauseTier::Short)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PauseTier::Short => "short",
            PauseTier::Medium => "medium",
            PauseTier::Long => "long",
        }
    }
}

impl fmt::Display for PauseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dwell duration rounded to one decimal place
///
/// Displays as the `P` word of a dwell command, e.g. `P0.3`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dwell {
    seconds: f64,
}

impl Dwell {
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds: round_tenth(seconds),
        }
    }

    /// Duration in seconds, already rounded
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whether this dwell equals `seconds` at one-decimal precision
    pub fn matches(&self, seconds: f64) -> bool {
        self.seconds == round_tenth(seconds)
    }
}

impl fmt::Display for Dwell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:.1}", self.seconds)
    }
}

/// Round through the one-decimal text form so comparisons agree with output
fn round_tenth(seconds: f64) -> f64 {
    format!("{seconds:.1}").parse().unwrap_or(seconds)
}

/// Dwells keyed by the line index of the move that ends each segment
pub type PausePlan = BTreeMap<usize, Dwell>;

/// Number of segments assigned to each tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseCounts {
    pub short: usize,
    pub medium: usize,
    pub long: usize,
    pub total: usize,
}

impl PauseCounts {
    pub fn record(&mut self, tier: PauseTier) {
        match tier {
            PauseTier::Short => self.short += 1,
            PauseTier::Medium => self.medium += 1,
            PauseTier::Long => self.long += 1,
        }
        self.total += 1;
    }
}

/// Outcome of classifying a whole trajectory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub plan: PausePlan,
    /// Tier of each segment, in order
    pub tiers: Vec<PauseTier>,
    pub counts: PauseCounts,
    /// Distance run up by consecutive short segments at the end of the path
    pub accumulator: f64,
}

/// Assign a dwell to every segment
pub fn classify(segments: &[Segment<'_>], tiers: &PauseTiers) -> Classification {
    if !tiers.is_consistent() {
        tracing::warn!(
            short_max = tiers.short.max_distance,
            medium_max = tiers.medium.max_distance,
            long_min = tiers.long.min_distance,
            "pause tier thresholds are not ordered; evaluation order decides"
        );
    }

    let mut result = Classification {
        tiers: Vec::with_capacity(segments.len()),
        ..Classification::default()
    };

    for segment in segments {
        let tier = PauseTier::for_distance(segment.distance, tiers);

        if tier.resets_accumulator() {
            result.accumulator = 0.0;
        } else {
            result.accumulator += segment.distance;
        }

        result
            .plan
            .insert(segment.to.source_line_index, Dwell::new(tier.seconds(tiers)));
        result.tiers.push(tier);
        result.counts.record(tier);
    }

    tracing::debug!(
        segments = segments.len(),
        short = result.counts.short,
        medium = result.counts.medium,
        long = result.counts.long,
        "classified segments"
    );

    result
}
